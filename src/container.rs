//! The generic `ContainerBox` recursive-descent loop (spec §4.5).
//!
//! Grounded in the teacher's `parser::parse_children` (the same read-header
//! / recurse-into-registry / append-or-abort loop) and, for exact byte-level
//! semantics the teacher's version left implicit, `ContainerBox.cpp` from
//! the original: the `mdat` skip policy, the `size == 1` -> `largesize`
//! widening with its 16-byte header overhead, and the "child decode error
//! aborts the parent" rule (step 8).

use crate::cast::numeric_cast;
use crate::context::ParseContext;
use crate::error::{Error, ErrorKind, Result};
use crate::fourcc::fourcc;
use crate::node::{BoxBody, BoxHeader, Node};
use crate::stream::{BinaryStream, MemoryStream};

const MDAT: crate::fourcc::FourCC = fourcc(b"mdat");

/// Runs the loop of spec §4.5 steps 1-8 over `stream`, whose cursor must
/// point at the start of a container's payload, until no bytes remain.
pub fn decode_children<'a>(stream: &mut dyn BinaryStream, ctx: &ParseContext<'a>) -> Result<Vec<Node>> {
    let mut children = Vec::new();

    loop {
        if !stream.has_bytes_available() {
            break;
        }

        let size = stream.read_be_u32()?;
        if size == 0 {
            // Trailing padding sentinel only when it's truly the last thing
            // in the stream (step 2); otherwise the open question from
            // spec §9 is resolved as rejection (SPEC_FULL.md §D).
            if !stream.has_bytes_available() {
                break;
            }
            return Err(Error::new(
                ErrorKind::InvalidBoxData,
                "size == 0 with bytes remaining is not a supported sentinel",
            ));
        }

        let name = stream.read_fourcc()?;

        let (total_size, header_size): (u64, u8) = if size == 1 {
            (stream.read_be_u64()?, 16)
        } else {
            (u64::from(size), 8)
        };

        if total_size < u64::from(header_size) {
            return Err(Error::new(ErrorKind::InvalidBoxData, "declared box size is smaller than its own header"));
        }

        let payload_len = total_size - u64::from(header_size);
        let payload_offset = stream.tell();
        let header = BoxHeader { total_size, name, header_size, payload_offset, payload_len };

        // step 7: a largesize exceeding the host's addressable range is
        // always skipped, regardless of `DoNotSkipMDATData`.
        let exceeds_host_range = usize::try_from(payload_len).is_err();

        if exceeds_host_range {
            skip(stream, payload_len)?;
            children.push(Node::new(header, BoxBody::Skipped));
            continue;
        }

        if name == MDAT && !ctx.options.do_not_skip_mdat_data {
            skip(stream, payload_len)?;
            children.push(Node::new(header, BoxBody::Skipped));
            continue;
        }

        let payload = stream.read_vec(payload_len as usize)?;

        if name == MDAT {
            // DoNotSkipMDATData was set and it fits: load it whole, but
            // still as an opaque blob (§3: mdat is never interpreted).
            children.push(Node::new(header, BoxBody::Opaque(payload)));
            continue;
        }

        let mut sub = MemoryStream::new(payload);
        match ctx.registry.decode(name, &mut sub, &header, ctx) {
            Ok(body) => children.push(Node::new(header, body)),
            Err(e) => {
                // step 8: log and abort the parent decode: the source
                // returns the error rather than skipping the bad child.
                log::warn!("failed to decode child box {name}: {e}");
                return Err(e);
            }
        }
    }

    Ok(children)
}

fn skip(stream: &mut dyn BinaryStream, len: u64) -> Result<()> {
    let offset: i64 = numeric_cast(len)?;
    stream.seek_from_current(offset)
}

/// Decodes the whole input as the synthetic root container (spec §3
/// "File"): a `ContainerBox` whose name is conventionally empty and whose
/// children are the top-level boxes.
pub fn decode_root<'a>(stream: &mut dyn BinaryStream, ctx: &ParseContext<'a>) -> Result<Node> {
    let len = stream.available_bytes()?;
    let children = decode_children(stream, ctx)?;
    let header = BoxHeader {
        total_size: len,
        name: fourcc(b"\0\0\0\0"),
        header_size: 0,
        payload_offset: 0,
        payload_len: len,
    };
    Ok(Node::new(header, BoxBody::Container(children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParserOptions;
    use crate::registry::Registry;

    fn ctx<'a>(registry: &'a Registry) -> ParseContext<'a> {
        ParseContext::new(registry, ParserOptions::default())
    }

    #[test]
    fn empty_ftyp() {
        let bytes = vec![0x00, 0x00, 0x00, 0x08, b'f', b't', b'y', b'p'];
        let registry = Registry::with_defaults();
        let mut stream = MemoryStream::new(bytes);
        let root = decode_root(&mut stream, &ctx(&registry)).unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].name().as_str_lossy(), "ftyp");
    }

    #[test]
    fn mdat_is_skipped_by_default() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x0c, b'm', b'd', b'a', b't'];
        bytes.extend_from_slice(&[0xAA; 4]);
        let registry = Registry::with_defaults();
        let mut stream = MemoryStream::new(bytes);
        let root = decode_root(&mut stream, &ctx(&registry)).unwrap();
        assert!(matches!(root.children()[0].body, BoxBody::Skipped));
    }

    #[test]
    fn mdat_is_loaded_when_requested() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x0c, b'm', b'd', b'a', b't'];
        bytes.extend_from_slice(&[0xAA; 4]);
        let registry = Registry::with_defaults();
        let mut stream = MemoryStream::new(bytes);
        let options = ParserOptions { do_not_skip_mdat_data: true, ..Default::default() };
        let context = ParseContext::new(&registry, options);
        let root = decode_root(&mut stream, &context).unwrap();
        match &root.children()[0].body {
            BoxBody::Opaque(bytes) => assert_eq!(bytes, &[0xAA; 4]),
            other => panic!("expected Opaque, got {other:?}"),
        }
    }

    #[test]
    fn truncated_box_fails_with_insufficient_data() {
        // declares 100 bytes but only 8 remain after the header
        let mut bytes = vec![0x00, 0x00, 0x00, 0x64, b'f', b't', b'y', b'p'];
        bytes.extend_from_slice(&[0u8; 8]);
        let registry = Registry::with_defaults();
        let mut stream = MemoryStream::new(bytes);
        let err = decode_root(&mut stream, &ctx(&registry)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InsufficientData);
    }

    #[test]
    fn rejects_unknown_fourcc_at_root() {
        let bytes = vec![0x00, 0x00, 0x00, 0x08, b'Z', b'Z', b'Z', b'Z'];
        let registry = Registry::with_defaults();
        let mut stream = MemoryStream::new(bytes);
        // unknown fourCCs are never errors at the container level
        let root = decode_root(&mut stream, &ctx(&registry)).unwrap();
        assert!(matches!(root.children()[0].body, BoxBody::Opaque(_)));
    }
}
