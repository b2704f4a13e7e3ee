//! # isobmff
//!
//! An ISO Base Media File Format (ISO/IEC 14496-12) box parser: reads a
//! byte stream, discovers the tree of typed binary containers ("boxes")
//! it's built from, and yields an introspectable in-memory representation.
//! The format underlies MP4, MOV, HEIF, and CMAF.
//!
//! This is a read-only parser: it locates and decodes box structure, not
//! compressed media payloads. `mdat` (media data) is skipped by default —
//! see [`context::ParserOptions::do_not_skip_mdat_data`] to load it anyway.
//!
//! ## Layout
//! - [`stream`] — the position-tracked, endian-aware [`stream::BinaryStream`]
//!   every decoder reads from.
//! - [`container`] — the generic recursive-descent loop that turns a
//!   container's payload into a `Vec<Node>` of decoded children.
//! - [`registry`] — the fourCC -> decoder dispatch table, with the default
//!   registrations this crate ships.
//! - [`parser`] — the public entry point: construct a [`parser::Parser`],
//!   optionally configure it, call one of its `parse*` methods.
//! - [`node`] — the parsed tree itself ([`node::Node`], [`node::BoxBody`])
//!   and the typed-lookup helpers used to walk it.
//! - [`boxes`] — the ~35 leaf box decoders (`ftyp`, `mvhd`, `tkhd`, `stsd`
//!   sample entries, HEIF item boxes, ...).
//!
//! # Quick start
//!
//! ```no_run
//! use isobmff::parser::Parser;
//! use isobmff::node::BoxBody;
//! use isobmff::fourcc::fourcc;
//!
//! fn main() -> Result<(), isobmff::error::Error> {
//!     let parser = Parser::new();
//!     let root = parser.parse_file("video.mp4")?;
//!
//!     if let Some(moov) = root.child(fourcc(b"moov")) {
//!         for trak in moov.children_named(fourcc(b"trak")) {
//!             if let Some(mdia) = trak.child(fourcc(b"mdia")) {
//!                 if let Some(hdlr) = mdia.typed_child::<isobmff::boxes::Hdlr>(fourcc(b"hdlr")) {
//!                     println!("track handler: {}", hdlr.handler_type);
//!                 }
//!             }
//!         }
//!     }
//!
//!     if let Some(BoxBody::Ftyp(ftyp)) = root.child(fourcc(b"ftyp")).map(|n| &n.body) {
//!         println!("major brand: {}", ftyp.major_brand);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom decoders and options
//!
//! ```no_run
//! use isobmff::parser::Parser;
//! use isobmff::context::ParserOptions;
//!
//! let mut parser = Parser::with_options(ParserOptions { do_not_skip_mdat_data: true, ..Default::default() });
//! parser.register_container_box("udta").unwrap();
//! let root = parser.parse_bytes(vec![0, 0, 0, 8, b'f', b't', b'y', b'p']).unwrap();
//! assert_eq!(root.children().len(), 1);
//! ```

pub mod box_names;
pub mod boxes;
pub mod cast;
pub mod container;
pub mod context;
pub mod error;
pub mod fourcc;
pub mod matrix;
pub mod node;
pub mod parser;
pub mod registry;
pub mod stream;

pub use box_names::full_name;
pub use context::{InfoValue, ParserOptions, StringType};
pub use error::{Error, ErrorKind, Result};
pub use fourcc::{fourcc, FourCC};
pub use matrix::Matrix;
pub use node::{BoxBody, BoxHeader, Node, TypedBox};
pub use parser::Parser;
pub use registry::{DecoderFn, Registry};
pub use stream::{BinaryStream, FileStream, MemoryStream, SeekDirection};
