//! The public entry point (spec §4.6 "Parser façade", §6 "Programmatic
//! surface"). Grounded in the teacher's top-level `Parser`-shaped API
//! (construct, optionally configure, call a parse method, get a tree back)
//! and in `Parser.cpp`'s `Parse(path|data|stream)` overload set and its
//! root fourCC allow-list.

use crate::context::{ParseContext, ParserOptions};
use crate::container::decode_root;
use crate::error::{Error, ErrorKind, Result};
use crate::fourcc::FourCC;
use crate::node::Node;
use crate::registry::{DecoderFn, Registry};
use crate::stream::{BinaryStream, FileStream, MemoryStream};
use std::path::Path;

/// The root fourCCs `Parse` accepts at absolute offset 4 (spec §4.6 step 2).
/// Anything else fails with `NotISOMediaFile`.
const VALID_ROOT_FOURCCS: [&[u8; 4]; 8] = [b"ftyp", b"sinf", b"wide", b"free", b"skip", b"mdat", b"moov", b"pnot"];

/// Owns a private registry, options, and (transitively, inside each
/// [`ParseContext`] it creates) an info dictionary — never process-wide
/// state (spec §9 "Global mutable state", §5 "Sharing": one `Parser` per
/// concurrent caller).
pub struct Parser {
    registry: Registry,
    options: ParserOptions,
}

impl Parser {
    pub fn new() -> Self {
        Parser { registry: Registry::with_defaults(), options: ParserOptions::default() }
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Parser { registry: Registry::with_defaults(), options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    /// Installs an explicit decoder for `name`, overriding any default
    /// registration (spec §8: "registering a user decoder for that fourCC
    /// overrides the generic container behaviour for subsequent Parses").
    /// Must be called before `parse*`; the registry is read-only during a
    /// parse.
    pub fn register_box(&mut self, name: &str, decoder: DecoderFn) -> Result<()> {
        self.registry.register_str(name, decoder)
    }

    pub fn register_container_box(&mut self, name: &str) -> Result<()> {
        self.registry.register_container_str(name)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Node> {
        let mut stream = FileStream::open(path)?;
        self.parse(&mut stream)
    }

    pub fn parse_bytes(&self, data: Vec<u8>) -> Result<Node> {
        let mut stream = MemoryStream::new(data);
        self.parse(&mut stream)
    }

    /// Parses from any caller-supplied seekable byte source (spec §4.6
    /// "any BinaryStream").
    pub fn parse(&self, stream: &mut dyn BinaryStream) -> Result<Node> {
        self.validate_root_fourcc(stream)?;
        let ctx = ParseContext::new(&self.registry, self.options.clone());
        decode_root(stream, &ctx)
    }

    /// Peeks the fourCC of the first box (at absolute offset 4, since byte
    /// 0 begins that box's own size field) without disturbing the stream's
    /// position (spec §4.6 step 1).
    fn validate_root_fourcc(&self, stream: &mut dyn BinaryStream) -> Result<()> {
        let mut buf = [0u8; 4];
        stream.get(&mut buf, 4)?;
        let name = FourCC::new(buf);
        if VALID_ROOT_FOURCCS.iter().any(|expected| name.as_bytes() == *expected) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::NotISOMediaFile, format!("unrecognised root fourCC {name}")))
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BoxBody;

    #[test]
    fn empty_ftyp_parses() {
        let bytes = vec![0x00, 0x00, 0x00, 0x08, b'f', b't', b'y', b'p'];
        let parser = Parser::new();
        let root = parser.parse_bytes(bytes).unwrap();
        assert_eq!(root.children().len(), 1);
        let BoxBody::Ftyp(ftyp) = &root.children()[0].body else { panic!("expected ftyp") };
        assert!(ftyp.compatible_brands.is_empty());
    }

    #[test]
    fn unrecognised_root_fourcc_fails() {
        let bytes = vec![0x00, 0x00, 0x00, 0x08, b'X', b'X', b'X', b'X'];
        let parser = Parser::new();
        let err = parser.parse_bytes(bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotISOMediaFile);
    }

    #[test]
    fn user_decoder_overrides_default_container() {
        fn marker<'a>(
            stream: &mut dyn BinaryStream,
            _header: &crate::node::BoxHeader,
            _ctx: &ParseContext<'a>,
        ) -> Result<BoxBody> {
            Ok(BoxBody::Opaque(stream.read_all()?))
        }

        let bytes = vec![0x00, 0x00, 0x00, 0x08, b'm', b'o', b'o', b'v'];
        let mut parser = Parser::new();
        parser.register_box("moov", marker).unwrap();
        let root = parser.parse_bytes(bytes).unwrap();
        assert!(matches!(root.children()[0].body, BoxBody::Opaque(_)));
    }
}
