//! Layout catalogs, fixed-width parsing and export for GDV records.
//!
//! This crate layers the I/O concerns on top of the `gdv-types` core
//! model:
//!
//! - [`Datentyp`] and [`Ausrichtung`] - datatype-aware formatting of
//!   field content into its fixed-width slot
//! - [`FeldDescriptor`] / [`SatzLayout`] / [`LayoutRegistry`] - catalogs
//!   describing which fields a record type carries, loadable from TOML
//! - [`parse_satz`] / [`parse_datei`] - slicing raw 256-byte lines back
//!   into records
//! - [`ExportConfig`] / [`SatzWriter`] - writing record streams with
//!   explicit, non-global export settings
//!
//! All record construction funnels through `Satz::add`, so the
//! no-overlap invariant holds on every path into a record.

pub mod ausrichtung;
pub mod datentyp;
pub mod error;
pub mod layout;
pub mod parser;
pub mod writer;

pub use ausrichtung::{format_aligned, Ausrichtung};
pub use datentyp::Datentyp;
pub use error::{CodecError, CodecResult};
pub use layout::{builtin, FeldDescriptor, LayoutRegistry, SatzLayout};
pub use parser::{erkenne_satz_typ, parse_datei, parse_satz};
pub use writer::{ExportConfig, SatzWriter, VU_NUMMER};
