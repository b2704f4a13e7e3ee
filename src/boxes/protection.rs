//! `frma` — original format box, and `schm` — scheme type box (spec §4.7).

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::fourcc::FourCC;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Frma {
    pub data_format: FourCC,
}

pub fn decode_frma<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let data_format = stream.read_fourcc()?;
    Ok(BoxBody::Frma(Frma { data_format }))
}

#[derive(Debug, Clone, Serialize)]
pub struct Schm {
    pub version: u8,
    pub flags: u32,
    pub scheme_type: FourCC,
    pub scheme_version: u32,
    pub scheme_uri: Option<String>,
}

const HAS_SCHEME_URI: u32 = 0x0000_0001;

pub fn decode_schm<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let scheme_type = stream.read_fourcc()?;
    let scheme_version = stream.read_be_u32()?;
    let scheme_uri = if flags & HAS_SCHEME_URI != 0 {
        let bytes = stream.read_all()?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        None
    };
    Ok(BoxBody::Schm(Schm { version, flags, scheme_type, scheme_version, scheme_uri }))
}
