//! `hvcC` / `avcC` — codec configuration records (spec §4.7): profile and
//! level indication plus grouped parameter-set byte strings. The two fourCCs
//! share this module because both fill the same [`DecoderConfigRecord`]
//! shape even though their on-wire layouts differ (AVC's is flat,
//! HEVC's groups parameter sets into NAL-unit-type arrays); `decode`
//! switches on `header.name` the way the registry would otherwise need two
//! near-identical entries.

use crate::context::ParseContext;
use crate::error::{Error, ErrorKind, Result};
use crate::fourcc::fourcc;
use crate::node::{BoxBody, BoxHeader};
use crate::stream::BinaryStream;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSet {
    pub data: Vec<u8>,
}

/// `parameter_sets` holds one group per NAL-unit category: for AVC that's
/// exactly two groups (SPS, then PPS); for HEVC it's one group per array
/// entry, in the order the stream declares them.
#[derive(Debug, Clone, Serialize)]
pub struct DecoderConfigRecord {
    pub configuration_version: u8,
    pub profile_indication: u8,
    pub level_indication: u8,
    pub length_size_minus_one: u8,
    pub parameter_sets: Vec<Vec<ParameterSet>>,
}

const AVCC: crate::fourcc::FourCC = fourcc(b"avcC");
const HVCC: crate::fourcc::FourCC = fourcc(b"hvcC");

pub fn decode<'a>(stream: &mut dyn BinaryStream, header: &BoxHeader, _ctx: &ParseContext<'a>) -> Result<BoxBody> {
    let record = if header.name == AVCC {
        decode_avcc(stream)?
    } else if header.name == HVCC {
        decode_hvcc(stream)?
    } else {
        return Err(Error::new(ErrorKind::InvalidBoxData, "codec_config::decode used for an unsupported fourCC"));
    };
    Ok(BoxBody::DecoderConfigRecord(record))
}

fn decode_parameter_sets(stream: &mut dyn BinaryStream, count: u32) -> Result<Vec<ParameterSet>> {
    let mut sets = Vec::new();
    for _ in 0..count {
        let len = stream.read_be_u16()?;
        sets.push(ParameterSet { data: stream.read_vec(len as usize)? });
    }
    Ok(sets)
}

fn decode_avcc(stream: &mut dyn BinaryStream) -> Result<DecoderConfigRecord> {
    let configuration_version = stream.read_u8()?;
    let profile_indication = stream.read_u8()?;
    let _profile_compatibility = stream.read_u8()?;
    let level_indication = stream.read_u8()?;
    let length_size_minus_one = stream.read_u8()? & 0x03;

    let num_sps = u32::from(stream.read_u8()? & 0x1F);
    let sps = decode_parameter_sets(stream, num_sps)?;

    let num_pps = u32::from(stream.read_u8()?);
    let pps = decode_parameter_sets(stream, num_pps)?;

    Ok(DecoderConfigRecord {
        configuration_version,
        profile_indication,
        level_indication,
        length_size_minus_one,
        parameter_sets: vec![sps, pps],
    })
}

fn decode_hvcc(stream: &mut dyn BinaryStream) -> Result<DecoderConfigRecord> {
    let configuration_version = stream.read_u8()?;
    let b1 = stream.read_u8()?;
    let profile_indication = b1 & 0x1F;
    let _general_profile_compatibility_flags = stream.read_be_u32()?;
    let _general_constraint_indicator_flags = stream.read_vec(6)?;
    let level_indication = stream.read_u8()?;
    let _min_spatial_segmentation = stream.read_be_u16()?;
    let _parallelism_type = stream.read_u8()?;
    let _chroma_format = stream.read_u8()?;
    let _bit_depth_luma_minus8 = stream.read_u8()?;
    let _bit_depth_chroma_minus8 = stream.read_u8()?;
    let _avg_frame_rate = stream.read_be_u16()?;
    let last_byte = stream.read_u8()?;
    let length_size_minus_one = last_byte & 0x03;

    let num_arrays = stream.read_u8()?;
    let mut parameter_sets = Vec::new();
    for _ in 0..num_arrays {
        let _array_info = stream.read_u8()?;
        let num_nalus = u32::from(stream.read_be_u16()?);
        parameter_sets.push(decode_parameter_sets(stream, num_nalus)?);
    }

    Ok(DecoderConfigRecord { configuration_version, profile_indication, level_indication, length_size_minus_one, parameter_sets })
}
