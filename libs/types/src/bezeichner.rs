//! Field identifiers (Bezeichner) and the technical-name derivation.
//!
//! A Bezeichner pairs the human-readable label from the GDV description
//! ("Geschäftsstelle / Vermittler") with a derived technical name
//! ("GeschaeftsstelleVermittler"). The technical name contains no spaces,
//! no special characters and no umlauts; it is the join key through which
//! independently authored field catalogs reconcile the same logical field.
//!
//! Equality, hashing and ordering are therefore defined on the technical
//! name only, case-insensitively. Two Bezeichner with different labels but
//! the same technical name are indistinguishable.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Human label plus canonical technical name of a field concept.
#[derive(Debug, Clone)]
pub struct Bezeichner {
    name: String,
    technischer_name: String,
}

impl Bezeichner {
    /// Creates a Bezeichner and derives the technical name from the label.
    pub fn of(name: impl Into<String>) -> Self {
        let name = name.into();
        let technischer_name = to_technischer_name(&name);
        Bezeichner {
            name,
            technischer_name,
        }
    }

    /// Creates a Bezeichner with an explicit technical name.
    ///
    /// Used for catalog entries whose technical name does not match the
    /// algorithmic derivation, e.g. "VU-Nummer" -> "VuNr".
    pub fn new(name: impl Into<String>, technischer_name: impl Into<String>) -> Self {
        Bezeichner {
            name: name.into(),
            technischer_name: technischer_name.into(),
        }
    }

    /// The human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived (or explicitly supplied) technical name.
    pub fn technical_name(&self) -> &str {
        &self.technischer_name
    }

    /// Merges with a catalog variant of the same field concept: the own
    /// label is kept, the other's technical name is adopted.
    pub fn merge_with(&self, other: &Bezeichner) -> Bezeichner {
        Bezeichner::new(self.name.clone(), other.technischer_name.clone())
    }
}

impl PartialEq for Bezeichner {
    fn eq(&self, other: &Self) -> bool {
        self.technischer_name
            .eq_ignore_ascii_case(&other.technischer_name)
    }
}

impl Eq for Bezeichner {}

impl Hash for Bezeichner {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.technischer_name.bytes() {
            state.write_u8(b.to_ascii_uppercase());
        }
    }
}

impl PartialOrd for Bezeichner {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bezeichner {
    fn cmp(&self, other: &Self) -> Ordering {
        self.technischer_name
            .bytes()
            .map(|b| b.to_ascii_uppercase())
            .cmp(other.technischer_name.bytes().map(|b| b.to_ascii_uppercase()))
    }
}

impl fmt::Display for Bezeichner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.technischer_name)
    }
}

/// Derives the technical name: the label is split on spaces, each word is
/// cleaned and abbreviated, the results are concatenated without separator.
fn to_technischer_name(input: &str) -> String {
    input.split(' ').map(to_shortcut).collect()
}

fn to_shortcut(input: &str) -> String {
    let mut converted = String::with_capacity(input.len());
    for ch in input.chars() {
        append_letter_or_digit_or_prozent(&mut converted, ch);
    }
    let word = converted;
    match word.as_str() {
        "fuer" => String::new(),
        "Nummer" => "Nr".to_string(),
        "Gesamtbeitrag" => "Gesbeitrag".to_string(),
        "VN" => "Vn".to_string(),
        "VP" => "Vp".to_string(),
        "VS" => "Vs".to_string(),
        "Waehrungseinheiten" => "WE".to_string(),
        _ => shorten(word),
    }
}

fn shorten(word: String) -> String {
    let chars: Vec<char> = word.chars().collect();
    // Definite articles ("der", "die", "das") are elided; "den" is kept.
    if chars.len() == 3 && chars[0].to_ascii_lowercase() == 'd' && chars[2] != 'n' {
        return String::new();
    }
    if word.ends_with("datum") {
        return chars[..chars.len() - 2].iter().collect();
    }
    if word.to_lowercase().ends_with("versicherung") {
        let capitalized = capitalize(&word);
        let n = capitalized.chars().count() - 12;
        let prefix: String = capitalized.chars().take(n).collect();
        return format!("{prefix}Vers");
    }
    if let Some(rest) = word.strip_prefix("eVB") {
        return format!("eVB{}", capitalize(rest));
    }
    if let Some(rest) = word.strip_prefix("KFT") {
        return format!("Kft{}", capitalize(rest));
    }
    if let Some(rest) = word.strip_prefix("KFV") {
        return format!("Kfv{}", capitalize(rest));
    }
    if let Some(rest) = word.strip_prefix("KH") {
        return format!("Kh{}", capitalize(rest));
    }
    capitalize(&word)
}

/// Uppercases the first letter and leaves the rest of the word unchanged.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn append_letter_or_digit_or_prozent(out: &mut String, ch: char) {
    match ch {
        'ä' => out.push_str("ae"),
        'ö' => out.push_str("oe"),
        'ü' => out.push_str("ue"),
        'Ä' => out.push_str("Ae"),
        'Ö' => out.push_str("Oe"),
        'Ü' => out.push_str("Ue"),
        'ß' => out.push_str("ss"),
        '%' => out.push_str("Proz"),
        c if c.is_alphanumeric() => out.push(c),
        _ => {}
    }
}
