//! kyc-domain
//!
//! Pure data model for the safari application wizard (draft slices, camp
//! reference data, wizard steps, tag vocabularies).
//! No I/O, no terminal, no storage. Only data types and core enums.

pub mod camp;
pub mod draft;
pub mod step;
pub mod tags;

pub use camp::*;
pub use draft::*;
pub use step::*;
