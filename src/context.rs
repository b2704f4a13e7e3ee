//! Per-parse configuration and the opaque info dictionary (spec §4.6).

use crate::registry::Registry;
use std::cell::RefCell;
use std::collections::HashMap;

/// Governs how an ambiguous-encoding string is read. Default `NullTerminated`
/// (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringType {
    #[default]
    NullTerminated,
    Pascal,
}

/// Recognised parser options (spec §4.6).
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    /// When set, `mdat` payloads are fully loaded rather than skipped.
    /// Doubles or worse the memory footprint; default off.
    pub do_not_skip_mdat_data: bool,
    pub string_type: StringType,
}

/// A value stored in the per-parse info dictionary. Kept as a small closed
/// enum rather than `Box<dyn Any>` — every current producer/consumer pair
/// (e.g. an `iloc` decoder recording a base offset for `iref`) only needs
/// these three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    U64(u64),
    String(String),
    Bytes(Vec<u8>),
}

/// Threaded through every decode call: the registry to dispatch children
/// with, the options in effect, and a mutable key/value scratch space
/// decoders use to pass context to later siblings (spec §4.6's
/// `GetInfo`/`SetInfo`). `RefCell` because decoders only ever hold a shared
/// `&ParseContext` — recursion into children never needs exclusive access
/// to the parent's context.
pub struct ParseContext<'a> {
    pub registry: &'a Registry,
    pub options: ParserOptions,
    info: RefCell<HashMap<String, InfoValue>>,
}

impl<'a> ParseContext<'a> {
    pub fn new(registry: &'a Registry, options: ParserOptions) -> Self {
        ParseContext { registry, options, info: RefCell::new(HashMap::new()) }
    }

    pub fn get_info(&self, key: &str) -> Option<InfoValue> {
        self.info.borrow().get(key).cloned()
    }

    pub fn set_info(&self, key: impl Into<String>, value: InfoValue) {
        self.info.borrow_mut().insert(key.into(), value);
    }
}
