// ABOUTME: Extraction rules for factbook country pages.
// ABOUTME: Country list, field values, country name, and anthem URL extractors.

//! Extraction rules.
//!
//! Each extractor is a pure function of a [`Document`](crate::Document) and,
//! for field values, a field key. They never fall back to alternate heuristics
//! when their primary signal is missing; they return an error instead.
//!
//! Submodules:
//! - `countries`: country page list from the country-selector control.
//! - `fields`: field values located by their `fieldkey=` label anchor.
//! - `country_name`: the page's country name.
//! - `anthem`: the national anthem recording URL.

pub mod anthem;
pub mod countries;
pub mod country_name;
pub mod fields;
