// ABOUTME: Field catalog mapping page sections and field names to factbook field keys.
// ABOUTME: Provides load_builtin_catalog() to parse the embedded JSON catalog.

//! Field catalog.
//!
//! The factbook tags each field with a numeric key (`2011` is geographic
//! coordinates). The catalog groups the known keys by page section, in page
//! order, under the names used for profile output.
//!
//! Later templates also mark each field block with an anchor id, and a few
//! fields (the terrorism section) only ever had the id. A field carries a key,
//! an id, or both.

use serde::{Deserialize, Serialize};

/// Embedded JSON containing the builtin field catalog.
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/field_catalog.json");

/// One field of a page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// The `fieldkey` query value in the field's label link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The label container id, without its `field-anchor-` prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}


/// A page section and its fields, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// Known fields grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCatalog {
    sections: Vec<CatalogSection>,
}

impl FieldCatalog {
    /// Creates a catalog from sections in page order.
    pub fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }

    /// Sections in page order.
    pub fn sections(&self) -> &[CatalogSection] {
        &self.sections
    }

    /// Looks up a field by section and field name.
    pub fn get(&self, section: &str, name: &str) -> Option<&FieldSpec> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .fields
            .iter()
            .find(|f| f.name == name)
    }

    /// Looks up a field by a `section.field` path, e.g. `geography.natural_hazards`.
    pub fn resolve(&self, path: &str) -> Option<&FieldSpec> {
        let (section, name) = path.split_once('.')?;
        self.get(section, name)
    }

    /// Finds the section and field a key belongs to.
    pub fn find_key(&self, key: &str) -> Option<(&CatalogSection, &FieldSpec)> {
        self.sections.iter().find_map(|section| {
            section
                .fields
                .iter()
                .find(|f| f.key.as_deref() == Some(key))
                .map(|field| (section, field))
        })
    }

    /// Total number of fields.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Returns true if the catalog has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads the builtin field catalog from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
pub fn load_builtin_catalog() -> FieldCatalog {
    serde_json::from_str(BUILTIN_CATALOG_JSON).expect("failed to parse builtin field catalog")
}
