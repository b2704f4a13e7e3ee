//! `iref` — item reference box, and the single-item-type-reference shape
//! shared by its children (`dimg`, `thmb`, `cdsc`, ...), grounded in
//! `include/IREF.hpp` / `include/CDSC.hpp`: a from-id plus a list of to-ids,
//! generalized here as one struct keyed by the child's fourCC rather than a
//! `CDSC`/`DIMG`/`THMB` subclass apiece (SPEC_FULL.md §B).

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::{InfoValue, ParseContext};
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::BinaryStream;
use serde::Serialize;

const IREF_VERSION_KEY: &str = "iref_version";

#[derive(Debug, Clone, Serialize)]
pub struct Iref {
    pub version: u8,
    pub flags: u32,
    pub children: Vec<Node>,
}

pub fn decode_iref<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    // `dimg`/`thmb`/`cdsc` aren't FullBoxes of their own; they inherit the
    // item-id width from the enclosing `iref`'s version, so stash it for
    // them to read back during the child dispatch below.
    ctx.set_info(IREF_VERSION_KEY, InfoValue::U64(u64::from(version)));
    let children = decode_children(stream, ctx)?;
    Ok(BoxBody::Iref(Iref { version, flags, children }))
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReference {
    pub from_item_id: u32,
    pub to_item_ids: Vec<u32>,
}

pub fn decode_reference<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let version = match ctx.get_info(IREF_VERSION_KEY) {
        Some(InfoValue::U64(v)) => v as u8,
        _ => 0,
    };

    let from_item_id = if version == 0 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
    let reference_count = stream.read_be_u16()?;

    let mut to_item_ids = Vec::new();
    for _ in 0..reference_count {
        let to = if version == 0 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
        to_item_ids.push(to);
    }

    Ok(BoxBody::ItemReference(ItemReference { from_item_id, to_item_ids }))
}
