//! `hdlr` — handler reference (spec §4.7).

use crate::boxes::read_full_box_header;
use crate::context::{ParseContext, StringType};
use crate::error::Result;
use crate::fourcc::FourCC;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Hdlr {
    pub version: u8,
    pub flags: u32,
    pub handler_type: FourCC,
    pub name: String,
}

/// The standard says `name` is NUL-terminated, but some encoders (old
/// QuickTime in particular) write it as a Pascal string instead — spec
/// §4.6 names this exact ambiguity as what `ParserOptions::string_type`
/// governs, so this is the read it's meant to steer.
pub fn decode<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let _pre_defined = stream.read_be_u32()?;
    let handler_type = stream.read_fourcc()?;
    for _ in 0..3 {
        let _reserved = stream.read_be_u32()?;
    }
    let name = match ctx.options.string_type {
        StringType::NullTerminated => stream.read_nul_terminated_string()?,
        StringType::Pascal => stream.read_pascal_string()?,
    };
    Ok(BoxBody::Hdlr(Hdlr { version, flags, handler_type, name }))
}
