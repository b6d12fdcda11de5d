//! Exporting records to fixed-width text streams.
//!
//! Export behavior is driven by an explicit [`ExportConfig`] handed to
//! the writer, never by process-wide state: two writers with different
//! configs can run side by side in one process.

use std::io;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gdv_types::{Bezeichner, Satz};

use crate::error::CodecResult;

/// The VU number field every framing record carries. Its technical name
/// cannot be derived from the label, so it is pinned here once.
pub static VU_NUMMER: Lazy<Bezeichner> = Lazy::new(|| Bezeichner::new("VU-Nummer", "VuNr"));

/// Explicit export settings, deserializable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Insurer number stamped into records whose VU field is still unset.
    pub vu_nummer: Option<String>,
    /// Line terminator between records.
    pub eol: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            vu_nummer: None,
            eol: "\n".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_toml_str(s: &str) -> CodecResult<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Writes records to a sink, one fixed-width line per record.
#[derive(Debug)]
pub struct SatzWriter<W: io::Write> {
    sink: W,
    config: ExportConfig,
    geschrieben: usize,
}

impl<W: io::Write> SatzWriter<W> {
    pub fn new(sink: W, config: ExportConfig) -> Self {
        SatzWriter {
            sink,
            config,
            geschrieben: 0,
        }
    }

    /// Exports one record followed by the configured line terminator.
    ///
    /// When a VU number is configured and the record has a VU field
    /// without a value, the number is filled in on a copy; the caller's
    /// record stays untouched.
    pub fn write_satz(&mut self, satz: &Satz) -> CodecResult<()> {
        match self.vu_nummer_fuer(satz) {
            Some(vu_nummer) => {
                let mut kopie = satz.clone();
                kopie.set_feld(&VU_NUMMER, &vu_nummer)?;
                kopie.export(&mut self.sink)?;
            }
            None => satz.export(&mut self.sink)?,
        }
        self.sink.write_all(self.config.eol.as_bytes())?;
        self.geschrieben += 1;
        debug!(satz_typ = %satz.satz_typ(), nr = self.geschrieben, "record written");
        Ok(())
    }

    fn vu_nummer_fuer(&self, satz: &Satz) -> Option<String> {
        let vu_nummer = self.config.vu_nummer.as_ref()?;
        match satz.get_feld(&VU_NUMMER) {
            Ok(feld) if !feld.has_value() => Some(vu_nummer.clone()),
            _ => None,
        }
    }

    /// Number of records written so far.
    pub fn anzahl_geschrieben(&self) -> usize {
        self.geschrieben
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
