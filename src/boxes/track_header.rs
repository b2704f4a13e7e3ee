//! `tkhd` — track header (spec §4.7), field order grounded in `TKHD.cpp`.

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Tkhd {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub track_id: u32,
    pub duration: u64,
    pub layer: i16,
    pub alternate_group: i16,
    pub volume: f64,
    pub matrix: Matrix,
    pub width: f64,
    pub height: f64,
}

pub fn decode<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;

    let (creation_time, modification_time, track_id, duration) = if version == 1 {
        let creation_time = stream.read_be_u64()?;
        let modification_time = stream.read_be_u64()?;
        let track_id = stream.read_be_u32()?;
        let _reserved = stream.read_be_u32()?;
        let duration = stream.read_be_u64()?;
        (creation_time, modification_time, track_id, duration)
    } else {
        let creation_time = u64::from(stream.read_be_u32()?);
        let modification_time = u64::from(stream.read_be_u32()?);
        let track_id = stream.read_be_u32()?;
        let _reserved = stream.read_be_u32()?;
        let duration = u64::from(stream.read_be_u32()?);
        (creation_time, modification_time, track_id, duration)
    };

    let _reserved0 = stream.read_be_u32()?;
    let _reserved1 = stream.read_be_u32()?;
    let layer = stream.read_be_u16()? as i16;
    let alternate_group = stream.read_be_u16()? as i16;
    let volume = stream.read_be_fixed_point(8, 8)?;
    let _reserved2 = stream.read_be_u16()?;
    let matrix = stream.read_matrix()?;
    let width = stream.read_be_fixed_point(16, 16)?;
    let height = stream.read_be_fixed_point(16, 16)?;

    Ok(BoxBody::Tkhd(Tkhd {
        version,
        flags,
        creation_time,
        modification_time,
        track_id,
        duration,
        layer,
        alternate_group,
        volume,
        matrix,
        width,
        height,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParserOptions;
    use crate::fourcc::FourCC;
    use crate::registry::Registry;
    use crate::stream::MemoryStream;

    #[test]
    fn version_0_uses_32_bit_times() {
        let mut bytes = vec![0u8, 0, 0, 0]; // version=0, flags=0
        bytes.extend_from_slice(&1u32.to_be_bytes()); // creation_time
        bytes.extend_from_slice(&2u32.to_be_bytes()); // modification_time
        bytes.extend_from_slice(&7u32.to_be_bytes()); // track_id
        bytes.extend_from_slice(&0u32.to_be_bytes()); // reserved
        bytes.extend_from_slice(&100u32.to_be_bytes()); // duration
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // layer
        bytes.extend_from_slice(&0u16.to_be_bytes()); // alternate_group
        bytes.extend_from_slice(&0x0100u16.to_be_bytes()); // volume = 1.0
        bytes.extend_from_slice(&0u16.to_be_bytes());
        for v in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        bytes.extend_from_slice(&0x0780_0000u32.to_be_bytes()); // width = 1920.0
        bytes.extend_from_slice(&0x0438_0000u32.to_be_bytes()); // height = 1080.0

        let mut stream = MemoryStream::new(bytes);
        let registry = Registry::new();
        let ctx = ParseContext::new(&registry, ParserOptions::default());
        let header = BoxHeader { total_size: 0, name: FourCC::from_str("tkhd").unwrap(), header_size: 8, payload_offset: 0, payload_len: 0 };
        let BoxBody::Tkhd(tkhd) = decode(&mut stream, &header, &ctx).unwrap() else { panic!() };
        assert_eq!(tkhd.track_id, 7);
        assert_eq!(tkhd.duration, 100);
        assert_eq!(tkhd.volume, 1.0);
        assert_eq!(tkhd.width, 1920.0);
        assert_eq!(tkhd.height, 1080.0);
        assert_eq!(tkhd.matrix, Matrix::identity());
    }
}
