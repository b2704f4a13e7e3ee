//! `meta` — metadata container (spec §4.7), and `pitm` — primary item
//! pointer, one of `meta`'s typical children.

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::BinaryStream;
use serde::Serialize;

/// `meta` is both a `FullBox` and a `Container` (spec §4.7): after its
/// version/flags prefix, the remainder of the payload is an ordinary
/// `ContainerBox` sequence (`hdlr`, `iinf`, `iloc`, `iref`, `pitm`, `idat`,
/// ...).
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub version: u8,
    pub flags: u32,
    pub children: Vec<Node>,
}

pub fn decode_meta<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let children = decode_children(stream, ctx)?;
    Ok(BoxBody::Meta(Meta { version, flags, children }))
}

#[derive(Debug, Clone, Serialize)]
pub struct Pitm {
    pub version: u8,
    pub flags: u32,
    pub item_id: u32,
}

pub fn decode_pitm<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let item_id = if version == 0 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
    Ok(BoxBody::Pitm(Pitm { version, flags, item_id }))
}
