//! Citypedia — city fact sheets from Wikipedia geography infoboxes.
//!
//! The interesting parts are pure: [`coords::normalize`] collapses the three
//! textual coordinate encodings into signed decimal degrees, and
//! [`infobox::extract`] lifts a loosely structured label/value table into a
//! flat record. [`article`] is the thin I/O glue around both.

pub mod article;
pub mod coords;
pub mod infobox;
