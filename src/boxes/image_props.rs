//! Image item properties (spec §4.7): `ispe`, `irot`, `pixi`, `colr`,
//! `ipma`, and `ipco` (the plain container that holds them).

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::ParseContext;
use crate::error::Result;
use crate::fourcc::FourCC;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Ispe {
    pub version: u8,
    pub flags: u32,
    pub image_width: u32,
    pub image_height: u32,
}

pub fn decode_ispe<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let image_width = stream.read_be_u32()?;
    let image_height = stream.read_be_u32()?;
    Ok(BoxBody::Ispe(Ispe { version, flags, image_width, image_height }))
}

/// Rotation in 90-degree steps. Not a `FullBox` — a single payload byte
/// whose low two bits hold the angle.
#[derive(Debug, Clone, Serialize)]
pub struct Irot {
    pub angle_degrees: u16,
}

pub fn decode_irot<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let b = stream.read_u8()?;
    let angle_degrees = u16::from(b & 0x03) * 90;
    Ok(BoxBody::Irot(Irot { angle_degrees }))
}

#[derive(Debug, Clone, Serialize)]
pub struct Pixi {
    pub version: u8,
    pub flags: u32,
    pub bits_per_channel: Vec<u8>,
}

pub fn decode_pixi<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let num_channels = stream.read_u8()?;
    let mut bits_per_channel = Vec::new();
    for _ in 0..num_channels {
        bits_per_channel.push(stream.read_u8()?);
    }
    Ok(BoxBody::Pixi(Pixi { version, flags, bits_per_channel }))
}

/// Colour information, in one of the `nclx` (on-the-wire coding point
/// triplet) or `rICC`/`prof` (embedded ICC profile) sub-variants.
#[derive(Debug, Clone, Serialize)]
pub enum Colr {
    Nclx { colour_primaries: u16, transfer_characteristics: u16, matrix_coefficients: u16, full_range_flag: bool },
    IccProfile { colour_type: FourCC, profile: Vec<u8> },
}

pub fn decode_colr<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let colour_type = stream.read_fourcc()?;
    let colr = if colour_type.as_bytes() == b"nclx" {
        let colour_primaries = stream.read_be_u16()?;
        let transfer_characteristics = stream.read_be_u16()?;
        let matrix_coefficients = stream.read_be_u16()?;
        let full_range_flag = (stream.read_u8()? & 0x80) != 0;
        Colr::Nclx { colour_primaries, transfer_characteristics, matrix_coefficients, full_range_flag }
    } else {
        Colr::IccProfile { colour_type, profile: stream.read_all()? }
    };
    Ok(BoxBody::Colr(colr))
}

#[derive(Debug, Clone, Serialize)]
pub struct IpmaAssociation {
    pub essential: bool,
    pub property_index: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct IpmaEntry {
    pub item_id: u32,
    pub associations: Vec<IpmaAssociation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ipma {
    pub version: u8,
    pub flags: u32,
    pub entries: Vec<IpmaEntry>,
}

pub fn decode_ipma<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let large_property_index = flags & 1 != 0;

    let mut entries = Vec::new();
    for _ in 0..entry_count {
        let item_id = if version < 1 { u32::from(stream.read_be_u16()?) } else { stream.read_be_u32()? };
        let association_count = stream.read_u8()?;

        let mut associations = Vec::new();
        for _ in 0..association_count {
            let association = if large_property_index {
                let v = stream.read_be_u16()?;
                IpmaAssociation { essential: v & 0x8000 != 0, property_index: v & 0x7FFF }
            } else {
                let v = stream.read_u8()?;
                IpmaAssociation { essential: v & 0x80 != 0, property_index: u16::from(v & 0x7F) }
            };
            associations.push(association);
        }

        entries.push(IpmaEntry { item_id, associations });
    }

    Ok(BoxBody::Ipma(Ipma { version, flags, entries }))
}

/// `ipco` is a plain `Container`, not a `FullBox` — just the property
/// boxes, in order.
pub fn decode_ipco<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    Ok(BoxBody::ItemPropertyContainer(decode_children(stream, ctx)?))
}
