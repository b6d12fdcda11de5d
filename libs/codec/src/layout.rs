//! Declarative record layouts and the layout registry.
//!
//! A layout catalog describes which fields a record type carries: name,
//! position, length, datatype. Catalogs are plain data, deserializable
//! from TOML, and drive record construction exclusively through
//! [`Satz::add`], so the overlap invariant is enforced on every
//! ingestion path.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use gdv_types::{Bezeichner, ByteAdresse, Feld, GdvError, Satz, SatzTyp};

use crate::ausrichtung::{format_aligned, Ausrichtung};
use crate::datentyp::Datentyp;
use crate::error::{CodecError, CodecResult};

/// One field of a record layout, as authored in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeldDescriptor {
    /// Human-readable label; the technical name is derived from it
    /// unless overridden.
    pub bezeichnung: String,
    #[serde(default)]
    pub technischer_name: Option<String>,
    /// Start position, 1-based.
    pub byte_adresse: u16,
    pub anzahl_bytes: usize,
    #[serde(default)]
    pub datentyp: Datentyp,
    /// Overrides the datatype's alignment when set.
    #[serde(default)]
    pub ausrichtung: Option<Ausrichtung>,
    /// Pre-filled content, e.g. the Satzart digits themselves.
    #[serde(default)]
    pub default_wert: Option<String>,
}

impl FeldDescriptor {
    pub fn bezeichner(&self) -> Bezeichner {
        match &self.technischer_name {
            Some(tech) => Bezeichner::new(self.bezeichnung.clone(), tech.clone()),
            None => Bezeichner::of(self.bezeichnung.clone()),
        }
    }

    /// Materializes the descriptor into a field, initialized with the
    /// datatype's fill and the default value, if any.
    pub fn build_feld(&self) -> CodecResult<Feld> {
        let adresse = ByteAdresse::of(i32::from(self.byte_adresse))?;
        let mut feld = Feld::new(self.bezeichner(), adresse, self.anzahl_bytes);
        if !feld.is_valid() {
            return Err(GdvError::OutOfRange {
                value: feld.end_adresse() as i32,
            }
            .into());
        }
        feld.set_content(&self.datentyp.initial(self.anzahl_bytes))?;
        if let Some(wert) = &self.default_wert {
            self.setze(&mut feld, wert)?;
        }
        Ok(feld)
    }

    /// Validates against the datatype and writes the value, using the
    /// descriptor's alignment override where one is set.
    pub fn setze(&self, feld: &mut Feld, wert: &str) -> CodecResult<()> {
        let Some(ausrichtung) = self.ausrichtung else {
            return self.datentyp.setze(feld, wert);
        };
        if !self.datentyp.ist_gueltig(wert) {
            return Err(CodecError::InvalidContent {
                bezeichner: feld.bezeichner().to_string(),
                content: wert.to_string(),
                datentyp: self.datentyp.name(),
            });
        }
        let formatted = format_aligned(
            feld.anzahl_bytes(),
            wert,
            ausrichtung,
            self.datentyp.fuellzeichen(),
        )?;
        feld.set_content(&formatted)?;
        Ok(())
    }
}

/// The complete field list of one record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatzLayout {
    pub satz_typ: SatzTyp,
    pub felder: Vec<FeldDescriptor>,
}

impl SatzLayout {
    /// Builds an empty record with all fields of this layout in place.
    pub fn build_satz(&self) -> CodecResult<Satz> {
        let mut satz = Satz::new(self.satz_typ.clone());
        for descriptor in &self.felder {
            satz.add(descriptor.build_feld()?)?;
        }
        Ok(satz)
    }

    /// Looks up the descriptor for a field by its identifier.
    pub fn descriptor(&self, bezeichner: &Bezeichner) -> Option<&FeldDescriptor> {
        self.felder.iter().find(|d| &d.bezeichner() == bezeichner)
    }
}

#[derive(Debug, Deserialize)]
struct Katalog {
    saetze: Vec<SatzLayout>,
}

/// Registry of all known record layouts, keyed by [`SatzTyp`].
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    layouts: HashMap<SatzTyp, SatzLayout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry from a TOML catalog with `[[saetze]]` tables.
    pub fn from_toml_str(s: &str) -> CodecResult<Self> {
        let katalog: Katalog = toml::from_str(s)?;
        let mut registry = LayoutRegistry::new();
        for layout in katalog.saetze {
            registry.register(layout);
        }
        Ok(registry)
    }

    /// Registers a layout, replacing any previous one for the same key.
    pub fn register(&mut self, layout: SatzLayout) {
        let key = layout.satz_typ.clone();
        debug!(satz_typ = %key, felder = layout.felder.len(), "layout registered");
        if self.layouts.insert(key.clone(), layout).is_some() {
            warn!(satz_typ = %key, "layout replaced");
        }
    }

    pub fn get(&self, satz_typ: &SatzTyp) -> Option<&SatzLayout> {
        self.layouts.get(satz_typ)
    }

    /// Like [`get`](Self::get), but an absent layout is an error.
    pub fn layout_for(&self, satz_typ: &SatzTyp) -> CodecResult<&SatzLayout> {
        self.get(satz_typ).ok_or_else(|| CodecError::UnknownSatzTyp {
            satz_typ: satz_typ.to_string(),
        })
    }

    /// Builds an empty record for the given type.
    pub fn build_satz(&self, satz_typ: &SatzTyp) -> CodecResult<Satz> {
        self.layout_for(satz_typ)?.build_satz()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

fn descriptor(
    bezeichnung: &str,
    technischer_name: Option<&str>,
    byte_adresse: u16,
    anzahl_bytes: usize,
    datentyp: Datentyp,
    default_wert: Option<&str>,
) -> FeldDescriptor {
    FeldDescriptor {
        bezeichnung: bezeichnung.to_string(),
        technischer_name: technischer_name.map(str::to_string),
        byte_adresse,
        anzahl_bytes,
        datentyp,
        ausrichtung: None,
        default_wert: default_wert.map(str::to_string),
    }
}

/// Built-in skeleton layouts for the framing records every GDV stream
/// carries: the Vorsatz (0001) opening and the Nachsatz (9999) trailer.
pub fn builtin() -> &'static LayoutRegistry {
    static BUILTIN: Lazy<LayoutRegistry> = Lazy::new(|| {
        let mut registry = LayoutRegistry::new();
        // framing satzarten are compile-time constants
        registry.register(SatzLayout {
            satz_typ: SatzTyp::parse("0001").unwrap_or_else(|_| unreachable!()),
            felder: vec![
                descriptor("Satzart", None, 1, 4, Datentyp::Numerisch, Some("1")),
                descriptor("VU-Nummer", Some("VuNr"), 5, 5, Datentyp::Alphanumerisch, None),
                descriptor("Absender", None, 10, 30, Datentyp::Alphanumerisch, None),
                descriptor("Adressat", None, 40, 30, Datentyp::Alphanumerisch, None),
                descriptor(
                    "Erstellungs-Datum Zeitraum vom",
                    Some("ErstellungsDatZeitraumVom"),
                    70,
                    8,
                    Datentyp::Datum,
                    None,
                ),
                descriptor(
                    "Erstellungs-Datum Zeitraum bis",
                    Some("ErstellungsDatZeitraumBis"),
                    78,
                    8,
                    Datentyp::Datum,
                    None,
                ),
                descriptor(
                    "Gesch\u{e4}ftsstelle / Vermittler",
                    None,
                    86,
                    10,
                    Datentyp::Alphanumerisch,
                    None,
                ),
            ],
        });
        registry.register(SatzLayout {
            satz_typ: SatzTyp::parse("9999").unwrap_or_else(|_| unreachable!()),
            felder: vec![
                descriptor("Satzart", None, 1, 4, Datentyp::Numerisch, Some("9999")),
                descriptor("Anzahl der S\u{e4}tze", None, 5, 10, Datentyp::Numerisch, None),
                descriptor(
                    "Gesch\u{e4}ftsstelle / Vermittler",
                    None,
                    15,
                    10,
                    Datentyp::Alphanumerisch,
                    None,
                ),
                descriptor("Gesamtbeitrag", None, 25, 15, Datentyp::Betrag, None),
                descriptor("VU-Nummer", Some("VuNr"), 40, 5, Datentyp::Alphanumerisch, None),
            ],
        });
        registry
    });
    &BUILTIN
}
