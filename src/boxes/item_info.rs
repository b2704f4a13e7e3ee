//! `iinf` — item information box, and `infe` — one entry within it (spec
//! §4.7).

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::ParseContext;
use crate::error::Result;
use crate::fourcc::FourCC;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Iinf {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    /// The decoded `infe` children, in parse order.
    pub children: Vec<Node>,
}

pub fn decode_iinf<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = if version == 0 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
    let children = decode_children(stream, ctx)?;
    Ok(BoxBody::Iinf(Iinf { version, flags, entry_count, children }))
}

#[derive(Debug, Clone, Serialize)]
pub struct Infe {
    pub version: u8,
    pub flags: u32,
    pub item_id: u32,
    pub item_protection_index: u16,
    /// Only present for `version >= 2`.
    pub item_type: Option<FourCC>,
    pub item_name: String,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
}

pub fn decode_infe<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;

    if version == 0 || version == 1 {
        let item_id = u32::from(stream.read_be_u16()?);
        let item_protection_index = stream.read_be_u16()?;
        let item_name = stream.read_nul_terminated_string()?;
        let content_type = Some(stream.read_nul_terminated_string()?);
        let content_encoding = if stream.has_bytes_available() { Some(stream.read_nul_terminated_string()?) } else { None };
        // version 1's extension_type/ItemInfoExtension trailer (used only
        // by `fdel` items) is left unread; it doesn't affect sibling
        // parsing since each box owns an isolated payload sub-stream.
        return Ok(BoxBody::Infe(Infe {
            version,
            flags,
            item_id,
            item_protection_index,
            item_type: None,
            item_name,
            content_type,
            content_encoding,
        }));
    }

    let item_id = if version == 2 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
    let item_protection_index = stream.read_be_u16()?;
    let item_type = stream.read_fourcc()?;
    let item_name = stream.read_nul_terminated_string()?;

    let (content_type, content_encoding) = match item_type.as_bytes() {
        b"mime" => {
            let content_type = stream.read_nul_terminated_string()?;
            let content_encoding = if stream.has_bytes_available() { Some(stream.read_nul_terminated_string()?) } else { None };
            (Some(content_type), content_encoding)
        }
        b"uri " => {
            let uri_type = stream.read_nul_terminated_string()?;
            (Some(uri_type), None)
        }
        _ => (None, None),
    };

    Ok(BoxBody::Infe(Infe {
        version,
        flags,
        item_id,
        item_protection_index,
        item_type: Some(item_type),
        item_name,
        content_type,
        content_encoding,
    }))
}
