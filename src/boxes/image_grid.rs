//! Image Grid (spec §4.7) — not a registered box; decoded on demand from an
//! item's payload bytes (HEIF derived image). Field order and the dead
//! 1-byte/8-byte width branches are replicated verbatim from
//! `ImageGrid.cpp` per spec §9: `s = ((flags & 1) + 1) * 2` can only ever
//! produce `2` or `4`, but the source still branches on `1` and `8`.

use crate::error::{Error, ErrorKind, Result};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ImageGrid {
    pub version: u8,
    pub flags: u8,
    pub rows_minus_one: u8,
    pub columns_minus_one: u8,
    pub output_width: u64,
    pub output_height: u64,
}

pub fn decode(stream: &mut dyn BinaryStream) -> Result<ImageGrid> {
    let version = stream.read_u8()?;
    let flags = stream.read_u8()?;
    let rows_minus_one = stream.read_u8()?;
    let columns_minus_one = stream.read_u8()?;

    let field_width = ((flags & 1) + 1) * 2;
    let (output_width, output_height) = match field_width {
        // Unreachable in practice — `field_width` is always 2 or 4 — kept
        // to mirror the original's branch shape rather than "fix" it away.
        1 => (u64::from(stream.read_u8()?), u64::from(stream.read_u8()?)),
        2 => (u64::from(stream.read_be_u16()?), u64::from(stream.read_be_u16()?)),
        4 => (u64::from(stream.read_be_u32()?), u64::from(stream.read_be_u32()?)),
        8 => (stream.read_be_u64()?, stream.read_be_u64()?),
        _ => return Err(Error::new(ErrorKind::InvalidBoxData, "unreachable image grid field width")),
    };

    Ok(ImageGrid { version, flags, rows_minus_one, columns_minus_one, output_width, output_height })
}
