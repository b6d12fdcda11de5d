//! Alignment of field content within its fixed-width slot.

use serde::{Deserialize, Serialize};

use gdv_types::GdvError;

use crate::error::CodecResult;

/// Justification of content within a field, with the datatype-specific
/// fill character applied on the opposite side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ausrichtung {
    /// Left-justified, the GDV default for text fields.
    #[default]
    Links,
    /// Right-justified, used by numeric fields.
    Rechts,
}

/// Places `s` in a slot of `len` chars, padding with `fill` on the side
/// the alignment leaves open. Content longer than the slot is rejected,
/// never truncated.
pub fn format_aligned(
    len: usize,
    s: &str,
    ausrichtung: Ausrichtung,
    fill: char,
) -> CodecResult<String> {
    let content_len = s.chars().count();
    if content_len > len {
        return Err(GdvError::ContentTooLong {
            bezeichner: s.to_string(),
            length: content_len,
            max: len,
        }
        .into());
    }
    let mut out = String::with_capacity(len);
    let padding = len - content_len;
    match ausrichtung {
        Ausrichtung::Links => {
            out.push_str(s);
            out.extend(std::iter::repeat(fill).take(padding));
        }
        Ausrichtung::Rechts => {
            out.extend(std::iter::repeat(fill).take(padding));
            out.push_str(s);
        }
    }
    Ok(out)
}
