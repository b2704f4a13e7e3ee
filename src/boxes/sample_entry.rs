//! `stsd` and its sample entries — `hvc1`/`hev1`/`avc1`/`avc3`/`av01`/`mp4a`
//! (spec §4.7).
//!
//! `avc3`/`hev1` reuse `avc1`/`hvc1`'s field-reading function and only
//! change the reported fourCC, mirroring the original's `AVC3 : public
//! AVC1` / `HEV1 : public HVC1` delegation (`include/AVC3.hpp`,
//! `include/HEV1.hpp` — SPEC_FULL.md §B) rather than duplicating the field
//! list.

use crate::boxes::read_full_box_header;
use crate::container::decode_children;
use crate::context::ParseContext;
use crate::error::Result;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub enum SampleEntryKind {
    Visual {
        width: u16,
        height: u16,
        horiz_resolution: u32,
        vert_resolution: u32,
        frame_count: u16,
        compressor_name: String,
        depth: u16,
    },
    Audio {
        channel_count: u16,
        sample_size: u16,
        sample_rate: u32,
    },
}

/// A decoded sample entry. `version`/`flags` are always `0` — sample
/// entries aren't `FullBox`es in the standard, these fields exist only so
/// every leaf variant exposes the same introspection shape.
#[derive(Debug, Clone, Serialize)]
pub struct SampleEntry {
    pub version: u8,
    pub flags: u32,
    pub data_reference_index: u16,
    pub kind: SampleEntryKind,
    pub children: Vec<Node>,
}

fn decode_visual<'a>(stream: &mut dyn BinaryStream, ctx: &ParseContext<'a>) -> Result<SampleEntry> {
    let _reserved = stream.read_vec(6)?;
    let data_reference_index = stream.read_be_u16()?;

    let _pre_defined0 = stream.read_be_u16()?;
    let _reserved0 = stream.read_be_u16()?;
    for _ in 0..3 {
        let _pre_defined1 = stream.read_be_u32()?;
    }
    let width = stream.read_be_u16()?;
    let height = stream.read_be_u16()?;
    let horiz_resolution = stream.read_be_u32()?;
    let vert_resolution = stream.read_be_u32()?;
    let _reserved1 = stream.read_be_u32()?;
    let frame_count = stream.read_be_u16()?;

    // The 32-byte `compressor_name` field is not a Pascal string to strip:
    // `BinaryStream::ReadString` reads the whole field as one buffer and
    // truncates only at the first embedded NUL, so its first byte (often a
    // Pascal-style length count in practice) survives as a literal leading
    // character.
    let compressor_name = stream.read_fixed_string(32)?;

    let depth = stream.read_be_u16()?;
    let _pre_defined2 = stream.read_be_u16()?;

    let children = decode_children(stream, ctx)?;

    Ok(SampleEntry {
        version: 0,
        flags: 0,
        data_reference_index,
        kind: SampleEntryKind::Visual { width, height, horiz_resolution, vert_resolution, frame_count, compressor_name, depth },
        children,
    })
}

fn decode_audio<'a>(stream: &mut dyn BinaryStream, ctx: &ParseContext<'a>) -> Result<SampleEntry> {
    let _reserved = stream.read_vec(6)?;
    let data_reference_index = stream.read_be_u16()?;

    let _reserved0 = stream.read_be_u32()?;
    let _reserved1 = stream.read_be_u32()?;
    let channel_count = stream.read_be_u16()?;
    let sample_size = stream.read_be_u16()?;
    let _pre_defined = stream.read_be_u16()?;
    let _reserved2 = stream.read_be_u16()?;
    let sample_rate = stream.read_be_u32()?;

    let children = decode_children(stream, ctx)?;

    Ok(SampleEntry {
        version: 0,
        flags: 0,
        data_reference_index,
        kind: SampleEntryKind::Audio { channel_count, sample_size, sample_rate },
        children,
    })
}

pub fn decode_avc1<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    Ok(BoxBody::SampleEntry(decode_visual(stream, ctx)?))
}

/// `avc3` is field-for-field identical to `avc1`; only its fourCC differs
/// (the original expresses this via subclassing, we via delegation).
pub fn decode_avc3<'a>(stream: &mut dyn BinaryStream, header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    decode_avc1(stream, header, ctx)
}

pub fn decode_hvc1<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    Ok(BoxBody::SampleEntry(decode_visual(stream, ctx)?))
}

/// `hev1` is field-for-field identical to `hvc1`; see [`decode_avc3`].
pub fn decode_hev1<'a>(stream: &mut dyn BinaryStream, header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    decode_hvc1(stream, header, ctx)
}

pub fn decode_av01<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    Ok(BoxBody::SampleEntry(decode_visual(stream, ctx)?))
}

pub fn decode_mp4a<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    Ok(BoxBody::SampleEntry(decode_audio(stream, ctx)?))
}

#[derive(Debug, Clone, Serialize)]
pub struct Stsd {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub children: Vec<Node>,
}

pub fn decode_stsd<'a>(stream: &mut dyn BinaryStream, _header: &BoxHeader, ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let (version, flags) = read_full_box_header(stream)?;
    let entry_count = stream.read_be_u32()?;
    let children = decode_children(stream, ctx)?;
    Ok(BoxBody::Stsd(Stsd { version, flags, entry_count, children }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParserOptions;
    use crate::fourcc::FourCC;
    use crate::registry::Registry;
    use crate::stream::MemoryStream;

    #[test]
    fn avc3_sample_entry_fields() {
        let mut bytes = vec![0u8; 6]; // reserved
        bytes.extend_from_slice(&1u16.to_be_bytes()); // data_reference_index
        bytes.extend_from_slice(&0u16.to_be_bytes()); // pre_defined
        bytes.extend_from_slice(&0u16.to_be_bytes()); // reserved
        bytes.extend_from_slice(&[0u8; 12]); // pre_defined[3]
        bytes.extend_from_slice(&1728u16.to_be_bytes()); // width
        bytes.extend_from_slice(&2304u16.to_be_bytes()); // height
        bytes.extend_from_slice(&0x0048_0000u32.to_be_bytes()); // horiz_resolution
        bytes.extend_from_slice(&0x0048_0000u32.to_be_bytes()); // vert_resolution
        bytes.extend_from_slice(&0u32.to_be_bytes()); // reserved
        bytes.extend_from_slice(&1u16.to_be_bytes()); // frame_count
        let name = b"Lavc61.19.101 libx264";
        bytes.push(name.len() as u8);
        let mut padded = name.to_vec();
        padded.resize(31, 0);
        bytes.extend_from_slice(&padded); // compressor_name: length byte + name, NUL-padded to 32
        bytes.extend_from_slice(&24u16.to_be_bytes()); // depth
        bytes.extend_from_slice(&0xFFFFu16.to_be_bytes()); // pre_defined = -1

        let mut stream = MemoryStream::new(bytes);
        let registry = Registry::with_defaults();
        let ctx = ParseContext::new(&registry, ParserOptions::default());
        let header = BoxHeader { total_size: 0, name: FourCC::from_str("avc3").unwrap(), header_size: 8, payload_offset: 0, payload_len: 0 };
        let BoxBody::SampleEntry(entry) = decode_avc3(&mut stream, &header, &ctx).unwrap() else { panic!() };
        assert_eq!(entry.version, 0);
        assert_eq!(entry.flags, 0);
        assert_eq!(entry.data_reference_index, 1);
        match entry.kind {
            SampleEntryKind::Visual { width, height, horiz_resolution, vert_resolution, frame_count, compressor_name, depth } => {
                assert_eq!(width, 1728);
                assert_eq!(height, 2304);
                assert_eq!(horiz_resolution, 0x0048_0000);
                assert_eq!(vert_resolution, 0x0048_0000);
                assert_eq!(frame_count, 1);
                assert_eq!(depth, 24);
                assert!(compressor_name.starts_with("\x15Lavc61.19.101 libx264"));
            }
            SampleEntryKind::Audio { .. } => panic!("expected visual"),
        }
    }

    #[test]
    fn compressor_name_with_no_nul_reads_all_32_bytes() {
        let mut bytes = vec![0u8; 6]; // reserved
        bytes.extend_from_slice(&1u16.to_be_bytes()); // data_reference_index
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 12]);
        bytes.extend_from_slice(&0u16.to_be_bytes()); // width
        bytes.extend_from_slice(&0u16.to_be_bytes()); // height
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // frame_count
        bytes.extend_from_slice(&[0xFF; 32]); // compressor_name: no embedded NUL, not valid UTF-8
        bytes.extend_from_slice(&0u16.to_be_bytes()); // depth
        bytes.extend_from_slice(&0u16.to_be_bytes());

        let mut stream = MemoryStream::new(bytes);
        let registry = Registry::with_defaults();
        let ctx = ParseContext::new(&registry, ParserOptions::default());
        let header = BoxHeader { total_size: 0, name: FourCC::from_str("avc1").unwrap(), header_size: 8, payload_offset: 0, payload_len: 0 };
        // must not panic
        let BoxBody::SampleEntry(entry) = decode_avc1(&mut stream, &header, &ctx).unwrap() else { panic!() };
        match entry.kind {
            SampleEntryKind::Visual { compressor_name, .. } => {
                assert_eq!(compressor_name, "\u{fffd}".repeat(32));
            }
            SampleEntryKind::Audio { .. } => panic!("expected visual"),
        }
    }
}
