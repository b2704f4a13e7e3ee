//! `mdhd` — media header (spec §4.7): version-gated time widths, timescale,
//! duration, packed ISO-639-2/T language code, reserved trailer.

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Mdhd {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    /// Decoded from the packed 3x5-bit-plus-pad field into its three ASCII
    /// letters, e.g. `"eng"`.
    pub language: String,
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

    let packed = stream.read_be_u16()?;
    let language = decode_packed_language(packed);
    let _pre_defined = stream.read_be_u16()?;

    Ok(BoxBody::Mdhd(Mdhd { version, flags, creation_time, modification_time, timescale, duration, language }))
}

fn decode_packed_language(packed: u16) -> String {
    let c1 = ((packed >> 10) & 0x1F) as u8 + 0x60;
    let c2 = ((packed >> 5) & 0x1F) as u8 + 0x60;
    let c3 = (packed & 0x1F) as u8 + 0x60;
    String::from_utf8_lossy(&[c1, c2, c3]).into_owned()
}
