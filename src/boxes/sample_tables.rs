//! `stts` / `stss` / `ctts` — sample timing and sync tables (spec §4.7):
//! `FullBox` header, `entry_count`, then that many fixed-width records.

use crate::boxes::read_full_box_header;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SttsEntry {
    pub sample_count: u32,
    pub sample_delta: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stts {
    pub version: u8,
    pub flags: u32,
    pub entries: Vec<SttsEntry>,
}

pub fn decode_stts<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let mut entries = Vec::new();
    for _ in 0..entry_count {
        let sample_count = stream.read_be_u32()?;
        let sample_delta = stream.read_be_u32()?;
        entries.push(SttsEntry { sample_count, sample_delta });
    }
    Ok(BoxBody::Stts(Stts { version, flags, entries }))
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CttsEntry {
    pub sample_count: u32,
    pub sample_offset: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ctts {
    pub version: u8,
    pub flags: u32,
    pub entries: Vec<CttsEntry>,
}

pub fn decode_ctts<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let mut entries = Vec::new();
    for _ in 0..entry_count {
        let sample_count = stream.read_be_u32()?;
        let sample_offset = stream.read_be_u32()?;
        entries.push(CttsEntry { sample_count, sample_offset });
    }
    Ok(BoxBody::Ctts(Ctts { version, flags, entries }))
}

#[derive(Debug, Clone, Serialize)]
pub struct Stss {
    pub version: u8,
    pub flags: u32,
    pub sample_numbers: Vec<u32>,
}

pub fn decode_stss<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let mut sample_numbers = Vec::new();
    for _ in 0..entry_count {
        sample_numbers.push(stream.read_be_u32()?);
    }
    Ok(BoxBody::Stss(Stss { version, flags, sample_numbers }))
}
