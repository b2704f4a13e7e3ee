//! Checked narrowing between integer widths (spec §4.2).
//!
//! Every boundary where an on-wire width (typically `u64`) meets a host
//! width (`usize`, `u32`, ...) goes through [`numeric_cast`] so that a
//! value which doesn't fit fails with [`ErrorKind::BadNumericCast`] instead
//! of silently wrapping or panicking.

use crate::error::{Error, ErrorKind, Result};
use std::convert::TryFrom;
use std::fmt::Display;

pub fn numeric_cast<S, D>(value: S) -> Result<D>
where
    D: TryFrom<S>,
    S: Display + Copy,
{
    D::try_from(value).map_err(|_| {
        Error::new(
            ErrorKind::BadNumericCast,
            format!("value {value} does not fit in destination type"),
        )
    })
}
