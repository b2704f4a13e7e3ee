//! `dref` — data reference box, and its `"url "` / `"urn "` entries (spec
//! §4.7).

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dref {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub children: Vec<Node>,
}

pub fn decode_dref<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let children = decode_children(stream, ctx)?;
    Ok(BoxBody::Dref(Dref { version, flags, entry_count, children }))
}

/// Shared shape for `"url "` and `"urn "` entries: flag bit 0 means "media
/// data is in this file", which skips the location (and, for `urn`, the
/// name) string entirely.
#[derive(Debug, Clone, Serialize)]
pub struct UrlUrn {
    pub version: u8,
    pub flags: u32,
    pub name: Option<String>,
    pub location: Option<String>,
}

const SELF_CONTAINED: u32 = 0x0000_0001;

pub fn decode_url<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let location = if flags & SELF_CONTAINED != 0 { None } else { Some(stream.read_nul_terminated_string()?) };
    Ok(BoxBody::Url(UrlUrn { version, flags, name: None, location }))
}

pub fn decode_urn<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    if flags & SELF_CONTAINED != 0 {
        return Ok(BoxBody::Urn(UrlUrn { version, flags, name: None, location: None }));
    }
    let name = stream.read_nul_terminated_string()?;
    let location = if stream.has_bytes_available() { Some(stream.read_nul_terminated_string()?) } else { None };
    Ok(BoxBody::Urn(UrlUrn { version, flags, name: Some(name), location }))
}
