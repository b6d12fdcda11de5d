//! Byte addresses within a 256-byte Teildatensatz.
//!
//! A GDV record line is at most 256 bytes long and every field is anchored
//! at an absolute position counted from 1. The address never shifts when
//! fields are added or removed elsewhere, which is why it doubles as a
//! stable lookup key inside a [`crate::Satz`].

use std::fmt;

use crate::error::{GdvError, Result};

/// A validated byte position in a record, from 1 to 256 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteAdresse(u16);

impl ByteAdresse {
    /// First addressable byte of a record.
    pub const MIN: ByteAdresse = ByteAdresse(1);
    /// Last addressable byte of a record.
    pub const MAX: ByteAdresse = ByteAdresse(256);

    /// Creates a byte address, rejecting everything outside 1..=256.
    pub fn of(n: i32) -> Result<Self> {
        if (1..=256).contains(&n) {
            Ok(ByteAdresse(n as u16))
        } else {
            Err(GdvError::OutOfRange { value: n })
        }
    }

    /// The numeric position, starting at 1.
    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ByteAdresse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
