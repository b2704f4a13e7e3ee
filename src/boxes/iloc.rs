//! `iloc` — item location box (spec §4.7): per-item extent tables whose
//! field widths come from four 4-bit packed sizes in the header.

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IlocExtent {
    pub extent_index: u64,
    pub extent_offset: u64,
    pub extent_length: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IlocItem {
    pub item_id: u32,
    pub construction_method: u16,
    pub data_reference_index: u16,
    pub base_offset: u64,
    pub extents: Vec<IlocExtent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Iloc {
    pub version: u8,
    pub flags: u32,
    pub offset_size: u8,
    pub length_size: u8,
    pub base_offset_size: u8,
    pub index_size: u8,
    pub items: Vec<IlocItem>,
}

/// Reads a big-endian unsigned value of `size` bytes (0-8), the shape the
/// four packed field widths use.
fn read_sized(stream: &mut dyn BinaryStream, size: u8) -> Result<u64> {
    if size == 0 {
        return Ok(0);
    }
    let bytes = stream.read_vec(size as usize)?;
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

pub fn decode<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;

    let sizes = stream.read_u8()?;
    let offset_size = sizes >> 4;
    let length_size = sizes & 0x0F;
    let sizes2 = stream.read_u8()?;
    let base_offset_size = sizes2 >> 4;
    let index_size = sizes2 & 0x0F;

    let item_count = if version < 2 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };

    // `item_count`/`extent_count` are attacker-controlled; build with
    // `Vec::new()` rather than `with_capacity(item_count)` so a forged huge
    // count fails on the eventual short read instead of an upfront
    // allocation.
    let mut items = Vec::new();
    for _ in 0..item_count {
        let item_id = if version < 2 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
        let construction_method = if version == 1 || version == 2 { stream.read_be_u16()? & 0x0F } else { 0 };
        let data_reference_index = stream.read_be_u16()?;
        let base_offset = read_sized(stream, base_offset_size)?;
        let extent_count = stream.read_be_u16()?;

        let mut extents = Vec::new();
        for _ in 0..extent_count {
            let extent_index = if (version == 1 || version == 2) && index_size > 0 {
                read_sized(stream, index_size)?
            } else {
                0
            };
            let extent_offset = read_sized(stream, offset_size)?;
            let extent_length = read_sized(stream, length_size)?;
            extents.push(IlocExtent { extent_index, extent_offset, extent_length });
        }

        items.push(IlocItem { item_id, construction_method, data_reference_index, base_offset, extents });
    }

    Ok(BoxBody::Iloc(Iloc { version, flags, offset_size, length_size, base_offset_size, index_size, items }))
}
