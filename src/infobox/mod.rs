//! Infobox field extraction subsystem.
//!
//! Turns the ordered label/value rows of a geography infobox into a flat
//! [`CityRecord`]. Pure: the document is already materialized by the caller.

pub mod extract;
pub mod types;

pub use extract::extract;
pub use types::{CityRecord, InfoboxError, Row};
