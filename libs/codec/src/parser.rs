//! Parsing fixed-width record lines back into [`Satz`] values.

use std::io::BufRead;

use tracing::trace;

use gdv_types::{Satz, SatzTyp};

use crate::error::{CodecError, CodecResult};
use crate::layout::{LayoutRegistry, SatzLayout};

/// Slices one fixed-width line into a record according to the layout.
///
/// Every field receives exactly the characters of its address range; a
/// line shorter than a field's end is padded with spaces, a line longer
/// than the 256-byte record boundary is rejected.
pub fn parse_satz(line: &str, layout: &SatzLayout) -> CodecResult<Satz> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() > 256 {
        return Err(CodecError::LineTooLong { length: chars.len() });
    }
    let mut satz = layout.build_satz()?;
    for descriptor in &layout.felder {
        let start = usize::from(descriptor.byte_adresse) - 1;
        let end = start + descriptor.anzahl_bytes;
        let mut content = String::with_capacity(descriptor.anzahl_bytes);
        for i in start..end {
            content.push(chars.get(i).copied().unwrap_or(' '));
        }
        trace!(feld = %descriptor.bezeichnung, %content, "field sliced");
        satz.get_feld_mut(&descriptor.bezeichner())?.set_content(&content)?;
    }
    Ok(satz)
}

/// Derives the record type key from the raw line: the Satzart sits in
/// bytes 1-4; for the Satzarten that branch per line of business the
/// Sparte follows in bytes 11-13.
pub fn erkenne_satz_typ(line: &str) -> CodecResult<SatzTyp> {
    let chars: Vec<char> = line.chars().collect();
    let satzart = slice_number(&chars, 0, 4).ok_or_else(|| invalid(line))?;
    let typ = if matches!(satzart, 210 | 211 | 220) {
        let sparte = slice_number(&chars, 10, 3).ok_or_else(|| invalid(line))?;
        SatzTyp::of(&[satzart, sparte])?
    } else {
        SatzTyp::of(&[satzart])?
    };
    Ok(typ)
}

fn slice_number(chars: &[char], start: usize, len: usize) -> Option<i32> {
    let digits: String = chars.get(start..start + len)?.iter().collect();
    digits.trim().parse().ok()
}

fn invalid(line: &str) -> CodecError {
    gdv_types::GdvError::InvalidFormat {
        input: line.chars().take(14).collect(),
    }
    .into()
}

/// Reads a whole record stream: one record per line, each resolved
/// against the registry via [`erkenne_satz_typ`]. Empty lines are
/// skipped.
pub fn parse_datei(reader: impl BufRead, registry: &LayoutRegistry) -> CodecResult<Vec<Satz>> {
    let mut saetze = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let typ = erkenne_satz_typ(&line)?;
        let layout = registry.layout_for(&typ)?;
        saetze.push(parse_satz(&line, layout)?);
    }
    Ok(saetze)
}
