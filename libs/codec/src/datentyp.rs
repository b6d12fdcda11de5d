//! Field datatypes and their formatting rules.
//!
//! The GDV description assigns each field one of a small set of kinds
//! that determine alignment, fill character and the admissible content.
//! They are modeled as one tagged enum with strategy methods rather than
//! a type per kind; catalogs name them by their lowercase string code.

use serde::{Deserialize, Serialize};

use gdv_types::Feld;

use crate::ausrichtung::{format_aligned, Ausrichtung};
use crate::error::{CodecError, CodecResult};

/// The kind of a field, driving validation and fixed-width formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datentyp {
    /// Free text, left-justified, space-filled.
    #[default]
    Alphanumerisch,
    /// Digits only, right-justified, zero-filled.
    Numerisch,
    /// A date as 8 digits TTMMJJJJ; "00000000" counts as unset.
    Datum,
    /// An amount in digits with two implied decimal places.
    Betrag,
}

impl Datentyp {
    pub fn name(self) -> &'static str {
        match self {
            Datentyp::Alphanumerisch => "Alphanumerisch",
            Datentyp::Numerisch => "Numerisch",
            Datentyp::Datum => "Datum",
            Datentyp::Betrag => "Betrag",
        }
    }

    pub fn ausrichtung(self) -> Ausrichtung {
        match self {
            Datentyp::Alphanumerisch => Ausrichtung::Links,
            _ => Ausrichtung::Rechts,
        }
    }

    pub fn fuellzeichen(self) -> char {
        match self {
            Datentyp::Alphanumerisch => ' ',
            _ => '0',
        }
    }

    /// The content an untouched field of this kind carries.
    pub fn initial(self, len: usize) -> String {
        std::iter::repeat(self.fuellzeichen()).take(len).collect()
    }

    /// Checks content against this kind's rules. The empty string is
    /// always admissible; it stands for "unset".
    pub fn ist_gueltig(self, content: &str) -> bool {
        if content.is_empty() {
            return true;
        }
        match self {
            Datentyp::Alphanumerisch => true,
            Datentyp::Numerisch | Datentyp::Betrag => {
                content.chars().all(|c| c.is_ascii_digit())
            }
            Datentyp::Datum => {
                content.len() == 8 && content.chars().all(|c| c.is_ascii_digit())
            }
        }
    }

    /// Validates, aligns and writes `wert` into the field.
    pub fn setze(self, feld: &mut Feld, wert: &str) -> CodecResult<()> {
        if !self.ist_gueltig(wert) {
            return Err(CodecError::InvalidContent {
                bezeichner: feld.bezeichner().to_string(),
                content: wert.to_string(),
                datentyp: self.name(),
            });
        }
        let formatted = format_aligned(feld.anzahl_bytes(), wert, self.ausrichtung(), self.fuellzeichen())?;
        feld.set_content(&formatted)?;
        Ok(())
    }
}
