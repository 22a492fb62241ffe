// ABOUTME: Main library entry point for the factbook page extractor.
// ABOUTME: Re-exports the public API: Document, the extractors, ExtractError, FieldCatalog, Profile.

//! Factbook extract - structured values from archived World Factbook pages.
//!
//! Country pages were published under several HTML templates over the years.
//! The extractors here rely only on conventions shared by every template, so
//! one rule set reads old table-based snapshots and newer `div`-based ones.
//!
//! # Example
//!
//! ```no_run
//! use factbook_extract::{extract_country_list, extract_field_value, Document, ExtractError};
//!
//! fn main() -> Result<(), ExtractError> {
//!     let html = std::fs::read_to_string("as.html").unwrap();
//!     let doc = Document::parse(&html);
//!     let countries = extract_country_list(&doc)?;
//!     let coordinates = extract_field_value(&doc, "2011")?;
//!     println!("{} countries, coordinates {}", countries.len(), coordinates);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod extractors;
pub mod profile;
pub mod selectors;

pub use crate::catalog::{load_builtin_catalog, CatalogSection, FieldCatalog, FieldSpec};
pub use crate::document::{Document, PageView};
pub use crate::error::{ExtractError, Result};
pub use crate::extractors::anthem::extract_anthem_url;
pub use crate::extractors::countries::extract_country_list;
pub use crate::extractors::country_name::extract_country_name;
pub use crate::extractors::fields::{extract_field_value, extract_field_value_by_anchor};
pub use crate::profile::{
    extract_catalog_field, extract_profile, Profile, ProfileField, ProfileSection,
};
