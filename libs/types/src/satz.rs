//! Records (Sätze): ordered collections of fields.
//!
//! A Satz owns its fields in byte-address order and keeps a secondary
//! index by technical name, so lookups work both ways. Adding a field
//! enforces the no-overlap invariant; the wire form is simply the
//! concatenation of all field contents in address order (see
//! [`Satz::export`]).
//!
//! A Satz is not thread-safe for concurrent writers. Shared record
//! templates are cloned for per-use mutation instead (copy-on-use).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::ops::Bound::{Excluded, Unbounded};

use tracing::debug;

use crate::adresse::ByteAdresse;
use crate::bezeichner::Bezeichner;
use crate::error::{GdvError, Result};
use crate::feld::Feld;
use crate::satz_typ::SatzTyp;

/// A fixed-width data record composed of non-overlapping fields.
#[derive(Debug, Clone)]
pub struct Satz {
    satz_typ: SatzTyp,
    felder: BTreeMap<ByteAdresse, Feld>,
    by_name: HashMap<String, ByteAdresse>,
}

impl Satz {
    /// Creates an empty record for the given type key.
    pub fn new(satz_typ: SatzTyp) -> Self {
        Satz {
            satz_typ,
            felder: BTreeMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// The record's type key.
    pub fn satz_typ(&self) -> &SatzTyp {
        &self.satz_typ
    }

    /// The record category, first segment of the type key.
    pub fn satzart(&self) -> u16 {
        self.satz_typ.satzart()
    }

    /// Adds a field, rejecting any overlap with an existing field.
    ///
    /// A field at the exact same start address as an existing one is an
    /// alias for the same position and replaces it. A field whose
    /// technical name is already taken at a *different* address is
    /// rejected; names are unique within a record. On error the record
    /// is left unchanged.
    pub fn add(&mut self, feld: Feld) -> Result<()> {
        if let Some(vorhanden) = self.find_overlap(&feld) {
            return Err(GdvError::OverlapViolation {
                neu: feld.to_string(),
                vorhanden: vorhanden.to_string(),
            });
        }
        let start = feld.byte_adresse();
        if let Some(&belegt) = self.by_name.get(&name_key(feld.bezeichner())) {
            if belegt != start {
                return Err(GdvError::DuplicateName {
                    name: feld.bezeichner().to_string(),
                    adresse: belegt.value(),
                });
            }
        }
        self.by_name.insert(name_key(feld.bezeichner()), start);
        if let Some(alt) = self.felder.insert(start, feld) {
            debug!(adresse = %start, ersetzt = %alt.bezeichner(), "field alias replaced");
            if self.by_name.get(&name_key(alt.bezeichner())) == Some(&start)
                && self.felder[&start].bezeichner() != alt.bezeichner()
            {
                self.by_name.remove(&name_key(alt.bezeichner()));
            }
        }
        Ok(())
    }

    /// Removes the field with the given identifier and returns it.
    pub fn remove(&mut self, bezeichner: &Bezeichner) -> Result<Feld> {
        let adresse = self
            .by_name
            .remove(&name_key(bezeichner))
            .ok_or_else(|| GdvError::FeldNotFound {
                name: bezeichner.to_string(),
            })?;
        // index and storage are kept in sync, the field must be there
        Ok(self
            .felder
            .remove(&adresse)
            .unwrap_or_else(|| unreachable!("index out of sync for {bezeichner}")))
    }

    /// Removes the given field (matched by its identifier).
    pub fn remove_feld(&mut self, feld: &Feld) -> Result<Feld> {
        self.remove(feld.bezeichner())
    }

    /// Looks up a field by identifier.
    pub fn get_feld(&self, bezeichner: &Bezeichner) -> Result<&Feld> {
        let adresse = self.by_name.get(&name_key(bezeichner)).ok_or_else(|| {
            GdvError::FeldNotFound {
                name: bezeichner.to_string(),
            }
        })?;
        Ok(&self.felder[adresse])
    }

    /// Looks up a field by identifier for mutation.
    pub fn get_feld_mut(&mut self, bezeichner: &Bezeichner) -> Result<&mut Feld> {
        let adresse = *self.by_name.get(&name_key(bezeichner)).ok_or_else(|| {
            GdvError::FeldNotFound {
                name: bezeichner.to_string(),
            }
        })?;
        Ok(self
            .felder
            .get_mut(&adresse)
            .unwrap_or_else(|| unreachable!("index out of sync")))
    }

    /// Looks up the field starting at the given address.
    pub fn get_feld_at(&self, adresse: ByteAdresse) -> Result<&Feld> {
        self.felder.get(&adresse).ok_or(GdvError::FeldNotFound {
            name: adresse.to_string(),
        })
    }

    /// Looks up the nr-th field in address order, counted from 1.
    pub fn get_feld_nr(&self, nr: usize) -> Result<&Feld> {
        if nr == 0 {
            return Err(GdvError::FeldNotFound {
                name: nr.to_string(),
            });
        }
        self.felder
            .values()
            .nth(nr - 1)
            .ok_or(GdvError::FeldNotFound {
                name: nr.to_string(),
            })
    }

    /// Sets the content of the field with the given identifier.
    pub fn set_feld(&mut self, bezeichner: &Bezeichner, inhalt: &str) -> Result<()> {
        self.get_feld_mut(bezeichner)?.set_content(inhalt)
    }

    pub fn has_feld(&self, bezeichner: &Bezeichner) -> bool {
        self.by_name.contains_key(&name_key(bezeichner))
    }

    /// All fields in ascending byte-address order.
    pub fn felder(&self) -> impl Iterator<Item = &Feld> {
        self.felder.values()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.felder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.felder.is_empty()
    }

    /// Writes the record in its wire form: all field contents concatenated
    /// in ascending byte-address order.
    pub fn export(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        for feld in self.felder.values() {
            feld.write(writer)?;
        }
        Ok(())
    }

    /// The wire form as a String.
    pub fn export_to_string(&self) -> String {
        self.felder.values().map(Feld::content).collect()
    }

    fn find_overlap(&self, feld: &Feld) -> Option<&Feld> {
        let start = feld.byte_adresse();
        if let Some((_, prev)) = self.felder.range(..start).next_back() {
            if prev.overlaps_with(feld) {
                return Some(prev);
            }
        }
        if let Some((_, next)) = self.felder.range((Excluded(start), Unbounded)).next() {
            if next.overlaps_with(feld) {
                return Some(next);
            }
        }
        None
    }
}

impl fmt::Display for Satz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Satzart {}", self.satz_typ)
    }
}

/// Two records are equal iff their exported wire forms are identical.
impl PartialEq for Satz {
    fn eq(&self, other: &Self) -> bool {
        self.export_to_string() == other.export_to_string()
    }
}

impl Eq for Satz {}

fn name_key(bezeichner: &Bezeichner) -> String {
    bezeichner.technical_name().to_ascii_uppercase()
}
