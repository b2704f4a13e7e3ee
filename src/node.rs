//! The parsed box tree (spec §3, §4.4, §9).
//!
//! The original leans on a `Box <- FullBox <- *` class hierarchy plus a
//! `Container` mixin. Per spec §9's explicit redesign guidance we replace
//! that with a plain record (`Node`) carrying a fourCC and a tagged union of
//! decoded contents (`BoxBody`) — containers hold a `Vec<Node>` rather than
//! a polymorphic pointer set.

use crate::boxes::*;
use crate::fourcc::FourCC;
use serde::Serialize;

/// The on-wire header every box starts with (spec §6): the effective total
/// size (already widened from `largesize` if present), the fourCC, how many
/// header bytes were consumed, and where the payload begins/ends in the
/// stream that was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxHeader {
    pub total_size: u64,
    pub name: FourCC,
    pub header_size: u8,
    pub payload_offset: u64,
    pub payload_len: u64,
}

/// One element of the parsed tree: its header plus whatever its decoder
/// produced.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub header: BoxHeader,
    pub body: BoxBody,
}

impl Node {
    pub fn new(header: BoxHeader, body: BoxBody) -> Self {
        Node { header, body }
    }

    pub fn name(&self) -> FourCC {
        self.header.name
    }

    /// Children, for any variant that holds them. Non-container variants
    /// have none (spec §4.5: `GetBoxes`).
    pub fn children(&self) -> &[Node] {
        match &self.body {
            BoxBody::Container(c) => c,
            BoxBody::Meta(m) => &m.children,
            BoxBody::Iinf(i) => &i.children,
            BoxBody::Iref(i) => &i.children,
            BoxBody::ItemPropertyContainer(c) => c,
            BoxBody::SampleEntry(e) => &e.children,
            BoxBody::Stsd(s) => &s.children,
            BoxBody::Dref(d) => &d.children,
            _ => &[],
        }
    }

    /// First child with the given name (spec §4.5 `GetBoxByName`).
    pub fn child(&self, name: FourCC) -> Option<&Node> {
        self.children().iter().find(|c| c.name() == name)
    }

    /// First child with the given name whose body decodes as `T` (spec
    /// §4.5 `GetTypedBox<T>`).
    pub fn typed_child<T: TypedBox>(&self, name: FourCC) -> Option<&T> {
        self.children()
            .iter()
            .filter(|c| c.name() == name)
            .find_map(|c| T::from_body(&c.body))
    }

    /// All children with the given name, in parse order.
    pub fn children_named(&self, name: FourCC) -> impl Iterator<Item = &Node> {
        self.children().iter().filter(move |c| c.name() == name)
    }
}

/// Narrows a `&BoxBody` to a specific decoded leaf type. Implemented for
/// every leaf struct via [`impl_typed_box`] below; mirrors `GetTypedBox<T>`
/// (spec §4.5) without needing a polymorphic pointer.
pub trait TypedBox: Sized {
    fn from_body(body: &BoxBody) -> Option<&Self>;
}

macro_rules! impl_typed_box {
    ($variant:ident, $ty:ty) => {
        impl TypedBox for $ty {
            fn from_body(body: &BoxBody) -> Option<&Self> {
                match body {
                    BoxBody::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_typed_box!(Ftyp, Ftyp);
impl_typed_box!(Mvhd, Mvhd);
impl_typed_box!(Tkhd, Tkhd);
impl_typed_box!(Mdhd, Mdhd);
impl_typed_box!(Hdlr, Hdlr);
impl_typed_box!(Meta, Meta);
impl_typed_box!(Pitm, Pitm);
impl_typed_box!(Iinf, Iinf);
impl_typed_box!(Infe, Infe);
impl_typed_box!(Iloc, Iloc);
impl_typed_box!(Iref, Iref);
impl_typed_box!(ItemReference, ItemReference);
impl_typed_box!(Ispe, Ispe);
impl_typed_box!(Irot, Irot);
impl_typed_box!(Pixi, Pixi);
impl_typed_box!(Colr, Colr);
impl_typed_box!(Ipma, Ipma);
impl_typed_box!(DecoderConfigRecord, DecoderConfigRecord);
impl_typed_box!(SampleEntry, SampleEntry);
impl_typed_box!(Stsd, Stsd);
impl_typed_box!(Stss, Stss);
impl_typed_box!(Stts, Stts);
impl_typed_box!(Ctts, Ctts);
impl_typed_box!(Dref, Dref);
impl_typed_box!(UrlUrn, UrlUrn);
impl_typed_box!(Frma, Frma);
impl_typed_box!(Schm, Schm);

/// The tagged union replacing the original's virtual-dispatch box
/// hierarchy (spec §9). `Container` is the generic, undecoded fallback
/// used for both registered container fourCCs and the synthetic root
/// (`File`, spec §3); boxes with their own typed container shape (`meta`,
/// `iref`, sample entries, `ipco`) carry their children inline instead.
#[derive(Debug, Clone, Serialize)]
pub enum BoxBody {
    Container(Vec<Node>),
    /// `mdat` skipped per the default policy (spec §4.5 step 6, §9): bytes
    /// were never read into memory.
    Skipped,
    /// An unregistered fourCC (spec §4.6 `CreateBox` fallback), or `mdat`
    /// loaded in full because `DoNotSkipMDATData` was set.
    Opaque(Vec<u8>),
    Ftyp(Ftyp),
    Mvhd(Mvhd),
    Tkhd(Tkhd),
    Mdhd(Mdhd),
    Hdlr(Hdlr),
    Meta(Meta),
    Pitm(Pitm),
    Iinf(Iinf),
    Infe(Infe),
    Iloc(Iloc),
    Iref(Iref),
    ItemReference(ItemReference),
    Ispe(Ispe),
    Irot(Irot),
    Pixi(Pixi),
    Colr(Colr),
    Ipma(Ipma),
    ItemPropertyContainer(Vec<Node>),
    DecoderConfigRecord(DecoderConfigRecord),
    SampleEntry(SampleEntry),
    Stsd(Stsd),
    Stss(Stss),
    Stts(Stts),
    Ctts(Ctts),
    Dref(Dref),
    Url(UrlUrn),
    Urn(UrlUrn),
    Frma(Frma),
    Schm(Schm),
}
