//! Fields (Felder) of a fixed-width record.
//!
//! A Feld is a fixed-length character buffer anchored at a [`ByteAdresse`].
//! The buffer length never changes after construction: shorter content is
//! overlaid left-justified on a space-filled buffer, longer content is
//! rejected. Right-justified placement and fill characters are a concern
//! of the codec layer on top, not of this container.
//!
//! Felder are plain values. When a record template is shared across
//! threads, callers clone the Feld for per-use mutation instead of locking
//! (copy-on-use).

use std::cmp::Ordering;
use std::fmt;
use std::io;

use crate::adresse::ByteAdresse;
use crate::bezeichner::Bezeichner;
use crate::error::{GdvError, Result};

/// A named, fixed-length, byte-addressed segment of a record.
#[derive(Debug, Clone)]
pub struct Feld {
    bezeichner: Bezeichner,
    byte_adresse: ByteAdresse,
    inhalt: Vec<char>,
}

impl Feld {
    /// Creates a field of the given length with space-filled content.
    pub fn new(bezeichner: Bezeichner, byte_adresse: ByteAdresse, anzahl_bytes: usize) -> Self {
        Feld {
            bezeichner,
            byte_adresse,
            inhalt: vec![' '; anzahl_bytes],
        }
    }

    /// Creates a field whose length is taken from the initial content.
    pub fn with_content(bezeichner: Bezeichner, byte_adresse: ByteAdresse, inhalt: &str) -> Self {
        Feld {
            bezeichner,
            byte_adresse,
            inhalt: inhalt.chars().collect(),
        }
    }

    /// The field's identifier.
    pub fn bezeichner(&self) -> &Bezeichner {
        &self.bezeichner
    }

    /// The human-readable label of the field.
    pub fn bezeichnung(&self) -> &str {
        self.bezeichner.name()
    }

    /// Start address, counted from 1.
    pub fn byte_adresse(&self) -> ByteAdresse {
        self.byte_adresse
    }

    /// Declared length in bytes.
    pub fn anzahl_bytes(&self) -> usize {
        self.inhalt.len()
    }

    /// Absolute end address: `start + length - 1`.
    ///
    /// May exceed 256 for a misdeclared field; see [`Feld::is_valid`].
    pub fn end_adresse(&self) -> usize {
        self.byte_adresse.value() as usize + self.inhalt.len() - 1
    }

    /// A field is valid when it does not reach past the record boundary.
    /// This is a validation-time check, not a construction-time one.
    pub fn is_valid(&self) -> bool {
        self.end_adresse() <= ByteAdresse::MAX.value() as usize
    }

    /// Overwrites the content, left-justified on a space-filled buffer.
    /// Content longer than the declared length is rejected, never truncated.
    pub fn set_content(&mut self, s: &str) -> Result<()> {
        let length = s.chars().count();
        if length > self.inhalt.len() {
            return Err(GdvError::ContentTooLong {
                bezeichner: self.bezeichner.to_string(),
                length,
                max: self.inhalt.len(),
            });
        }
        self.reset_content();
        for (i, c) in s.chars().enumerate() {
            self.inhalt[i] = c;
        }
        Ok(())
    }

    /// Sets the content to the decimal form of `n`.
    pub fn set_int(&mut self, n: i64) -> Result<()> {
        self.set_content(&n.to_string())
    }

    /// Resets the buffer and sets a single character at position 0.
    pub fn set_char(&mut self, c: char) -> Result<()> {
        self.set_char_at(c, 0)
    }

    /// Resets the buffer and sets a single character at the given position.
    pub fn set_char_at(&mut self, c: char, index: usize) -> Result<()> {
        if index >= self.inhalt.len() {
            return Err(GdvError::OutOfRange {
                value: index as i32,
            });
        }
        self.reset_content();
        self.inhalt[index] = c;
        Ok(())
    }

    /// The exact buffer contents, including padding.
    pub fn content(&self) -> String {
        self.inhalt.iter().collect()
    }

    /// Fills the buffer with spaces.
    pub fn reset_content(&mut self) {
        self.inhalt.fill(' ');
    }

    /// True iff the trimmed content is empty.
    pub fn is_empty(&self) -> bool {
        self.inhalt.iter().all(|c| c.is_whitespace())
    }

    /// True iff a value was actually set: trimmed content is non-empty and
    /// not the single zero that numeric fields are initialized with.
    pub fn has_value(&self) -> bool {
        let value = self.content();
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed != "0"
    }

    /// Checks whether two fields with different start addresses overlap.
    ///
    /// Fields sharing the exact same start address never overlap: they are
    /// aliases for the same position (variant definitions of one slot).
    pub fn overlaps_with(&self, other: &Feld) -> bool {
        if self.byte_adresse == other.byte_adresse {
            return false;
        }
        if self.byte_adresse < other.byte_adresse {
            self.end_adresse() >= other.byte_adresse.value() as usize
        } else {
            other.end_adresse() >= self.byte_adresse.value() as usize
        }
    }

    /// Writes the exact content to the given sink.
    pub fn write(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        writer.write_all(self.content().as_bytes())
    }
}

impl fmt::Display for Feld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Feld {} ({}-{}): \"{}\"",
            self.bezeichner,
            self.byte_adresse,
            self.end_adresse(),
            self.content().trim()
        )
    }
}

/// Two fields are equal iff identifier, content and start address match.
impl PartialEq for Feld {
    fn eq(&self, other: &Self) -> bool {
        self.bezeichner == other.bezeichner
            && self.inhalt == other.inhalt
            && self.byte_adresse == other.byte_adresse
    }
}

impl Eq for Feld {}

/// Hash covers the same attributes as equality.
impl std::hash::Hash for Feld {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bezeichner.hash(state);
        self.inhalt.hash(state);
        self.byte_adresse.hash(state);
    }
}

impl PartialOrd for Feld {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fields are ordered by start address; fields at the same address compare
/// as equal regardless of their other attributes.
impl Ord for Feld {
    fn cmp(&self, other: &Self) -> Ordering {
        self.byte_adresse.cmp(&other.byte_adresse)
    }
}
