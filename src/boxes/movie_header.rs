//! `mvhd` — movie header (spec §4.7): same version-gated time widths as
//! `tkhd`/`mdhd`, plus the overall rate/volume/matrix/next-track-id fields.

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Mvhd {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    pub rate: f64,
    pub volume: f64,
    pub matrix: Matrix,
    pub next_track_id: u32,
}

pub fn decode<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;

    let (creation_time, modification_time, timescale, duration) = if version == 1 {
        let creation_time = stream.read_be_u64()?;
        let modification_time = stream.read_be_u64()?;
        let timescale = stream.read_be_u32()?;
        let duration = stream.read_be_u64()?;
        (creation_time, modification_time, timescale, duration)
    } else {
        let creation_time = u64::from(stream.read_be_u32()?);
        let modification_time = u64::from(stream.read_be_u32()?);
        let timescale = stream.read_be_u32()?;
        let duration = u64::from(stream.read_be_u32()?);
        (creation_time, modification_time, timescale, duration)
    };

    let rate = stream.read_be_fixed_point(16, 16)?;
    let volume = stream.read_be_fixed_point(8, 8)?;
    let _reserved = stream.read_be_u16()?;
    let _reserved0 = stream.read_be_u32()?;
    let _reserved1 = stream.read_be_u32()?;
    let matrix = stream.read_matrix()?;
    for _ in 0..6 {
        let _pre_defined = stream.read_be_u32()?;
    }
    let next_track_id = stream.read_be_u32()?;

    Ok(BoxBody::Mvhd(Mvhd {
        version,
        flags,
        creation_time,
        modification_time,
        timescale,
        duration,
        rate,
        volume,
        matrix,
        next_track_id,
    }))
}
