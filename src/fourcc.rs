//! Four-byte box type tags.
//!
//! A fourCC is an opaque 4-byte identifier, *not* normalised — `"url "`
//! (with a trailing space) is a different key from `"url"` (spec §3).

use serde::Serialize;
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn new(bytes: [u8; 4]) -> Self {
        FourCC(bytes)
    }

    /// Builds a `FourCC` from a 4-byte ASCII string literal, for use in
    /// registry registrations and tests. Returns `None` if `s` isn't
    /// exactly 4 bytes (spec §4.6: registration rejects other lengths).
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Lossy display form; non-printable bytes become `.`. Never used for
    /// comparisons — only for logging and introspection.
    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

/// Shorthand for fourCC literals used throughout the registry and tests,
/// e.g. `fourcc(b"ftyp")`.
pub const fn fourcc(bytes: &[u8; 4]) -> FourCC {
    FourCC(*bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_trailing_space() {
        let url = FourCC::from_str("url ").unwrap();
        let urn = FourCC::from_str("urn ").unwrap();
        assert_ne!(url, urn);
        assert_eq!(url.as_bytes(), b"url ");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(FourCC::from_str("abc").is_none());
        assert!(FourCC::from_str("abcde").is_none());
    }
}
