//! Core value types of the GDV record model.
//!
//! The GDV release ("Gesamtverband der Deutschen Versicherungswirtschaft")
//! exchanges insurance data as fixed-width text records of 256 bytes. This
//! crate models the building blocks of that format:
//!
//! - [`ByteAdresse`] - a validated 1-based position within a record
//! - [`Bezeichner`] - a field identifier with a canonical technical name
//! - [`Feld`] - a named fixed-length character buffer at an address
//! - [`SatzTyp`] - the composite record type key, e.g. `"0220.010.13.1"`
//! - [`Satz`] - an ordered, overlap-free collection of fields
//!
//! Parsing and exporting whole record streams, field catalogs and
//! datatype-aware formatting live in the `gdv-codec` crate on top.
//!
//! ## Design principles
//!
//! - **Fail at the point of violation**: constructors and mutators return
//!   [`GdvError`] instead of clamping or truncating input.
//! - **Canonical keys**: [`Bezeichner`] and [`SatzTyp`] normalize their
//!   input once and compare on the normalized form, so independently
//!   authored catalogs agree on identity.
//! - **Plain values**: everything here is `Clone` and lock-free; shared
//!   templates are cloned for per-use mutation.

pub mod adresse;
pub mod bezeichner;
pub mod error;
pub mod feld;
pub mod satz;
pub mod satz_typ;

pub use adresse::ByteAdresse;
pub use bezeichner::Bezeichner;
pub use error::{GdvError, Result};
pub use feld::Feld;
pub use satz::Satz;
pub use satz_typ::{SatzTyp, WagnisKind};
