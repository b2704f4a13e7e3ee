//! `ftyp` — file type / compatible brands (spec §4.7).

use crate::context::ParseContext;
use crate::error::Result;
use crate::fourcc::FourCC;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Ftyp {
    pub major_brand: FourCC,
    pub minor_version: u32,
    pub compatible_brands: Vec<FourCC>,
}

pub fn decode<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let major_brand = stream.read_fourcc()?;
    let minor_version = stream.read_be_u32()?;
    let mut compatible_brands = Vec::new();
    while stream.has_bytes_available() {
        compatible_brands.push(stream.read_fourcc()?);
    }
    Ok(BoxBody::Ftyp(Ftyp { major_brand, minor_version, compatible_brands }))
}
