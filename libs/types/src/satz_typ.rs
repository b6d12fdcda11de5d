//! Composite record type keys (SatzTyp).
//!
//! A SatzTyp joins record category (Satzart), line of business (Sparte),
//! a branch-dependent third segment and the Teildatensatz number into one
//! key, e.g. "0220.010.13.7". The third segment means different things per
//! Sparte: for life insurance (10) it is the Wagnisart, for health (20)
//! the KrankenFolgeNr, for building savings (220.580) the BausparenArt.
//!
//! Identity is the canonical string rendering, not the stored parts: two
//! keys are equal iff they render identically. Catalogs of record layouts
//! rely on this rule, so it is kept even where it surprises (a Wagnisart
//! of 1 and of 3 produce the same key because both render as "13").

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use serde::de::Error as _;

use crate::error::{GdvError, Result};

/// Collapsed life-insurance risk groupings used by the record catalogs.
///
/// Wagnisart 1 and 3 share the layouts of the combined code 13, and 4 and
/// 8 those of 48; the remaining codes stand for themselves.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum WagnisKind {
    Sonstige = 0,
    Rente = 2,
    Risikozusatz = 5,
    Unfallzusatz = 6,
    Fondsgebunden = 7,
    FondsRente = 9,
    KapitalRisiko = 13,
    Berufsunfaehigkeit = 48,
}

/// Composite key identifying a record's layout.
#[derive(Debug, Clone)]
pub struct SatzTyp {
    /// Defaulted parts, 1 to 4 entries.
    teil: Vec<u16>,
    /// Canonical rendering; the identity of the key.
    kanonisch: String,
}

impl SatzTyp {
    /// Builds a SatzTyp from 1 to 4 numeric parts, applying the documented
    /// defaulting rules (see [`SatzTyp::parse`] for the string form).
    pub fn of(args: &[i32]) -> Result<Self> {
        if args.is_empty() || args.len() > 4 {
            return Err(GdvError::InvalidArity { count: args.len() });
        }
        let mut teil = Vec::with_capacity(4);
        for &n in args {
            if n < 0 {
                return Err(GdvError::InvalidFormat {
                    input: n.to_string(),
                });
            }
            teil.push(n as u16);
        }
        if teil[0] > 9999 {
            return Err(GdvError::InvalidFormat {
                input: format!("Satzart {}", teil[0]),
            });
        }
        if teil.len() > 1 && teil[1] > 999 {
            return Err(GdvError::InvalidFormat {
                input: format!("Sparte {}", teil[1]),
            });
        }
        apply_defaults(&mut teil);
        let kanonisch = render(&teil);
        Ok(SatzTyp { teil, kanonisch })
    }

    /// Parses the dotted string form, e.g. "0210.050" or "0220.010.13.1".
    ///
    /// Defaulting rules applied after parsing:
    /// - Satzart 210, 211 and 220 without Sparte get the general Sparte 0;
    /// - "0220.010" gets Wagnisart 0 appended;
    /// - a life-insurance key with Wagnisart but without Teildatensatz
    ///   number gets number 1 appended ("0220.010.13" means "0220.010.13.1").
    pub fn parse(nr: &str) -> Result<Self> {
        let parts: Vec<&str> = nr.split('.').collect();
        let mut args = Vec::with_capacity(parts.len());
        for part in parts {
            let n: i32 = part.parse().map_err(|_| GdvError::InvalidFormat {
                input: nr.to_string(),
            })?;
            args.push(n);
        }
        SatzTyp::of(&args)
    }

    /// The record category (Satzart), e.g. 220.
    pub fn satzart(&self) -> u16 {
        self.teil[0]
    }

    /// The line of business (Sparte), 0 when absent or general.
    pub fn sparte(&self) -> u16 {
        self.teil.get(1).copied().unwrap_or(0)
    }

    /// The raw Wagnisart as stored, without the 13/48 collapsing.
    pub fn wagnisart(&self) -> Result<u16> {
        if !self.has_wagnisart() {
            return Err(self.not_applicable("Wagnisart"));
        }
        Ok(self.teil[2])
    }

    /// The collapsed life-insurance risk grouping, if this is a life key.
    pub fn wagnis_kind(&self) -> Result<WagnisKind> {
        if self.sparte() != 10 {
            return Err(self.not_applicable("Wagnisart"));
        }
        let art = self.art()?;
        WagnisKind::try_from(art as u8).map_err(|_| GdvError::InvalidFormat {
            input: format!("Wagnisart {art}"),
        })
    }

    /// Follow-up number for health insurance (Sparte 20, values 1..=3).
    pub fn kranken_folge_nr(&self) -> Result<u16> {
        if !self.has_kranken_folge_nr() {
            return Err(self.not_applicable("KrankenFolgeNr"));
        }
        Ok(self.teil[2])
    }

    /// Building-savings variant (Satzart 220, Sparte 580).
    pub fn bausparen_art(&self) -> Result<u16> {
        if !self.has_bausparen_art() {
            return Err(self.not_applicable("BausparenArt"));
        }
        Ok(self.teil[2])
    }

    /// The third segment as used for canonical rendering: Wagnisart with
    /// the 1/3 -> 13 and 4/8 -> 48 collapse, KrankenFolgeNr or BausparenArt
    /// depending on the Sparte.
    pub fn art(&self) -> Result<u16> {
        if !self.has_art() {
            return Err(self.not_applicable("Art"));
        }
        Ok(derive_art(&self.teil))
    }

    /// The third segment as rendered: BausparenArt 1 renders as "01".
    pub fn art_as_string(&self) -> Result<String> {
        if !self.has_art() {
            return Err(self.not_applicable("Art"));
        }
        Ok(render_art(&self.teil))
    }

    /// Sequence number of the Teildatensatz, 0 when absent.
    pub fn teildatensatz_nummer(&self) -> u16 {
        self.teil.get(3).copied().unwrap_or(0)
    }

    pub fn has_sparte(&self) -> bool {
        self.teil.len() > 1 && self.teil[1] > 0
    }

    pub fn has_wagnisart(&self) -> bool {
        self.teil.len() > 2
    }

    pub fn has_kranken_folge_nr(&self) -> bool {
        self.teil.len() > 2 && self.sparte() == 20
    }

    pub fn has_bausparen_art(&self) -> bool {
        self.teil.len() > 2 && self.satzart() == 220 && self.sparte() == 580
    }

    pub fn has_art(&self) -> bool {
        self.has_wagnisart() || self.has_kranken_folge_nr() || self.has_bausparen_art()
    }

    /// A Teildatensatz number is present iff the key has all 4 parts.
    pub fn has_teildatensatz_nummer(&self) -> bool {
        self.teil.len() > 3
    }

    pub fn has_parent(&self) -> bool {
        self.kanonisch.contains('.')
    }

    /// The key with the last canonical segment stripped, e.g.
    /// "0220.580.01" -> "0220.580".
    pub fn parent(&self) -> Option<SatzTyp> {
        let (prefix, _) = self.kanonisch.rsplit_once('.')?;
        // segments were validated at construction, re-parsing cannot fail
        SatzTyp::parse(prefix).ok()
    }
}

fn apply_defaults(teil: &mut Vec<u16>) {
    let satzart = teil[0];
    if matches!(satzart, 210 | 211 | 220) && teil.len() < 2 {
        teil.push(0);
    }
    if teil.len() == 2 && satzart == 220 && teil[1] == 10 {
        teil.push(0);
    }
    if teil.len() == 3 && teil[1] == 10 && teil[2] > 0 {
        teil.push(1);
    }
}

fn derive_art(teil: &[u16]) -> u16 {
    // branches 20 and 580 carry counters, not risk types; no collapse
    let sparte = teil[1];
    if sparte == 20 || sparte == 580 {
        return teil[2];
    }
    match teil[2] {
        1 | 3 => 13,
        4 | 8 => 48,
        art => art,
    }
}

fn render_art(teil: &[u16]) -> String {
    let bausparen = teil[0] == 220 && teil[1] == 580;
    if bausparen && teil[2] == 1 {
        "01".to_string()
    } else {
        derive_art(teil).to_string()
    }
}

fn render(teil: &[u16]) -> String {
    let mut buf = format!("{:04}", teil[0]);
    let has_sparte = teil.len() > 1 && teil[1] > 0;
    if has_sparte {
        buf.push_str(&format!(".{:03}", teil[1]));
        if teil.len() > 2 {
            buf.push('.');
            buf.push_str(&render_art(teil));
            if teil.len() > 3 {
                buf.push_str(&format!(".{}", teil[3]));
            }
        }
    }
    buf
}

impl SatzTyp {
    fn not_applicable(&self, attribut: &'static str) -> GdvError {
        GdvError::NotApplicable {
            satz_typ: self.kanonisch.clone(),
            attribut,
        }
    }
}

impl fmt::Display for SatzTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kanonisch)
    }
}

impl FromStr for SatzTyp {
    type Err = GdvError;

    fn from_str(s: &str) -> Result<Self> {
        SatzTyp::parse(s)
    }
}

/// Identity is the canonical rendering (see module docs).
impl PartialEq for SatzTyp {
    fn eq(&self, other: &Self) -> bool {
        self.kanonisch == other.kanonisch
    }
}

impl Eq for SatzTyp {}

impl Hash for SatzTyp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kanonisch.hash(state);
    }
}

impl PartialOrd for SatzTyp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SatzTyp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.kanonisch.cmp(&other.kanonisch)
    }
}

impl serde::Serialize for SatzTyp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.kanonisch)
    }
}

impl<'de> serde::Deserialize<'de> for SatzTyp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SatzTyp::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typ(nr: &str) -> SatzTyp {
        SatzTyp::parse(nr).unwrap()
    }

    #[test]
    fn test_equals() {
        assert_eq!(SatzTyp::of(&[1]).unwrap(), SatzTyp::of(&[1]).unwrap());
        assert_ne!(typ("1.1"), typ("1.1.1"));
    }

    #[test]
    fn test_to_string() {
        assert_eq!("0001", SatzTyp::of(&[1]).unwrap().to_string());
        assert_eq!("0210.050", SatzTyp::of(&[210, 50]).unwrap().to_string());
        assert_eq!("0220.010.0", SatzTyp::of(&[220, 10, 0]).unwrap().to_string());
        assert_eq!(
            "0220.010.6.1",
            SatzTyp::of(&[220, 10, 6, 1]).unwrap().to_string()
        );
    }

    #[test]
    fn test_ctors() {
        assert_eq!(typ("0001"), SatzTyp::of(&[1]).unwrap());
        assert_eq!(typ("0210.050"), SatzTyp::of(&[210, 50]).unwrap());
        assert_eq!(typ("0220.010.0"), SatzTyp::of(&[220, 10, 0]).unwrap());
        assert_eq!(typ("0220.010.6.1"), SatzTyp::of(&[220, 10, 6, 1]).unwrap());
    }

    #[test]
    fn test_satzart_sparte() {
        assert_eq!(210, typ("0210.050").satzart());
        assert_eq!(50, typ("0210.050").sparte());
        assert_eq!(0, typ("0001").sparte());
    }

    #[test]
    fn test_of_wagnisart_1_und_3() {
        assert_eq!(typ("0220.010.13.7"), SatzTyp::of(&[220, 10, 1, 7]).unwrap());
        assert_eq!(typ("0220.010.13.7"), SatzTyp::of(&[220, 10, 3, 7]).unwrap());
        assert_eq!(
            "0220.010.13.7",
            SatzTyp::of(&[220, 10, 1, 7]).unwrap().to_string()
        );
    }

    /// "0220.010.13" does not exist on its own; it means "0220.010.13.1".
    #[test]
    fn test_wagnisart_leben_default_nummer() {
        assert_eq!(typ("0220.010.13.1"), typ("0220.010.13"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            SatzTyp::parse("0001.a"),
            Err(GdvError::InvalidFormat { .. })
        ));
        assert!(matches!(
            SatzTyp::parse("1.2.3.4.5"),
            Err(GdvError::InvalidArity { count: 5 })
        ));
        assert!(matches!(
            SatzTyp::parse(""),
            Err(GdvError::InvalidFormat { .. })
        ));
        assert!(matches!(
            SatzTyp::of(&[]),
            Err(GdvError::InvalidArity { count: 0 })
        ));
        assert!(matches!(
            SatzTyp::of(&[10000]),
            Err(GdvError::InvalidFormat { .. })
        ));
        assert!(matches!(
            SatzTyp::of(&[220, 1000]),
            Err(GdvError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_get_art() {
        assert_eq!("1", typ("0220.020.1").art_as_string().unwrap());
        assert_eq!("2", typ("0220.020.2").art_as_string().unwrap());
        assert_eq!("3", typ("0220.020.3").art_as_string().unwrap());
        assert_eq!("01", typ("0220.580.01").art_as_string().unwrap());
        assert_eq!("2", typ("0220.580.2").art_as_string().unwrap());
    }

    #[test]
    fn test_get_art_wagnisart() {
        for (expected, nr) in [
            ("0", "0220.010.0"),
            ("13", "0220.010.13"),
            ("13", "0221.010.13"),
            ("48", "0220.010.48"),
            ("48", "0221.010.48"),
            ("6", "0220.010.6"),
            ("6", "0221.010.6"),
            ("5", "0220.010.5"),
            ("2", "0220.010.2"),
            ("7", "0221.010.7"),
            ("9", "0220.010.9"),
        ] {
            assert_eq!(expected, typ(nr).art_as_string().unwrap(), "for {nr}");
        }
    }

    #[test]
    fn test_get_art_wagnisart_collapse() {
        assert_eq!("13", typ("220.10.1").art_as_string().unwrap());
        assert_eq!("13", typ("220.10.3").art_as_string().unwrap());
        assert_eq!("48", typ("220.10.4").art_as_string().unwrap());
        assert_eq!("48", typ("220.10.8").art_as_string().unwrap());
    }

    /// The raw Wagnisart accessor does not collapse.
    #[test]
    fn test_wagnisart_raw() {
        assert_eq!(1, typ("220.10.1").wagnisart().unwrap());
        assert_eq!(3, typ("220.10.3").wagnisart().unwrap());
        assert_eq!(13, typ("0220.010.13").wagnisart().unwrap());
        assert!(typ("0220.000").wagnisart().is_err());
    }

    #[test]
    fn test_wagnis_kind() {
        assert_eq!(WagnisKind::KapitalRisiko, typ("220.10.1").wagnis_kind().unwrap());
        assert_eq!(WagnisKind::KapitalRisiko, typ("220.10.3").wagnis_kind().unwrap());
        assert_eq!(WagnisKind::Berufsunfaehigkeit, typ("220.10.8").wagnis_kind().unwrap());
        assert_eq!(WagnisKind::Rente, typ("0220.010.2").wagnis_kind().unwrap());
        assert!(typ("0220.020.1").wagnis_kind().is_err());
    }

    #[test]
    fn test_has_art() {
        assert!(typ("0220.020.1").has_art());
        assert!(!typ("0220.000").has_art());
    }

    #[test]
    fn test_to_string_bausparen() {
        assert_eq!("0220.580.01", typ("0220.580.01").to_string());
        assert_eq!("0220.580.2", typ("0220.580.2").to_string());
    }

    /// Branch 580 never collapses to a risk type, whatever the Satzart;
    /// but the "01" rendering and the accessor stay exclusive to 0220.580.
    #[test]
    fn test_sparte_580_stays_raw() {
        assert_eq!("1", typ("0221.580.1").art_as_string().unwrap());
        assert_eq!("0221.580.1", typ("0221.580.1").to_string());
        assert!(matches!(
            typ("0221.580.1").bausparen_art(),
            Err(GdvError::NotApplicable { .. })
        ));
    }

    #[test]
    fn test_bausparen_art() {
        assert_eq!(1, typ("0220.580.01").bausparen_art().unwrap());
        assert_eq!(2, typ("0220.580.2").bausparen_art().unwrap());
        assert!(matches!(
            typ("0220.570").bausparen_art(),
            Err(GdvError::NotApplicable { .. })
        ));
    }

    #[test]
    fn test_of_bausparen_art() {
        assert_eq!(typ("0220.580.01"), SatzTyp::of(&[220, 580, 1]).unwrap());
        assert_eq!(typ("0220.580.2"), SatzTyp::of(&[220, 580, 2]).unwrap());
        assert_eq!(typ("0220.570"), SatzTyp::of(&[220, 570]).unwrap());
    }

    #[test]
    fn test_kranken_folge_nr() {
        assert_eq!(1, typ("0220.020.1").kranken_folge_nr().unwrap());
        assert_eq!(2, typ("0220.020.2").kranken_folge_nr().unwrap());
        assert_eq!(3, typ("0220.020.3").kranken_folge_nr().unwrap());
        assert!(!typ("0220.000").has_kranken_folge_nr());
        assert!(!typ("0220.580.01").has_kranken_folge_nr());
        assert_eq!("0220.020.1", typ("0220.020.1").to_string());
    }

    /// Satzart 210, 211 and 220 have a "general" record with Sparte 000.
    #[test]
    fn test_allgemeiner_satz() {
        assert_eq!(typ("0210.000"), typ("0210"));
        assert_eq!(typ("0211.000"), typ("0211"));
        assert_eq!(typ("0220.000"), typ("0220"));
    }

    /// "0220.010" does not exist either; Wagnisart 0 is assumed.
    #[test]
    fn test_leben_wagnisart_0() {
        assert_eq!(typ("0220.010.0"), typ("0220.010"));
        assert_eq!("0220.010.0", typ("0220.010.0").to_string());
    }

    #[test]
    fn test_sparte_0_not_rendered() {
        let a = typ("0100");
        let b = typ("0100.000");
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_teildatensatz_nummer() {
        assert_eq!(7, typ("0220.010.13.7").teildatensatz_nummer());
        assert!(typ("0220.010.13.7").has_teildatensatz_nummer());
        assert_eq!(0, typ("0210.050").teildatensatz_nummer());
        assert!(!typ("0210.050").has_teildatensatz_nummer());
    }

    #[test]
    fn test_parent() {
        assert_eq!(Some(typ("0220.580")), typ("0220.580.01").parent());
        assert!(typ("0220.580.01").has_parent());
        assert_eq!(None, typ("0001").parent());
        assert!(!typ("0001").has_parent());
    }

    #[test]
    fn test_roundtrip() {
        let original = SatzTyp::of(&[220, 10, 13, 7]).unwrap();
        assert_eq!(original, SatzTyp::parse(&original.to_string()).unwrap());
    }

    #[test]
    fn test_hash_follows_rendering() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SatzTyp::of(&[220, 10, 1, 7]).unwrap());
        assert!(set.contains(&SatzTyp::of(&[220, 10, 3, 7]).unwrap()));
    }

    proptest::proptest! {
        /// Rendering and re-parsing is the identity on the key.
        #[test]
        fn parse_render_roundtrip(satzart in 1u16..=9999, sparte in 0u16..=999) {
            let t = SatzTyp::of(&[satzart as i32, sparte as i32]).unwrap();
            let reparsed = SatzTyp::parse(&t.to_string()).unwrap();
            proptest::prop_assert_eq!(t, reparsed);
        }
    }
}
