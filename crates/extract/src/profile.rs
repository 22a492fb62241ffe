// ABOUTME: Whole-page profile extraction driven by the field catalog.
// ABOUTME: Collects the country name, anthem URL, and every catalog field present on the page.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{FieldCatalog, FieldSpec};
use crate::document::Document;
use crate::error::{ExtractError, Result};
use crate::extractors::anthem::extract_anthem_url;
use crate::extractors::country_name::extract_country_name;
use crate::extractors::fields::{extract_field_value, extract_field_value_by_anchor};

/// Everything extracted from one country page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthem_url: Option<String>,
    pub sections: Vec<ProfileSection>,
}

/// The fields of one page section that were present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSection {
    pub name: String,
    pub fields: Vec<ProfileField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl Profile {
    /// Value of a field by section and field name.
    pub fn field(&self, section: &str, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Returns true if no field was found.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Extracts one catalog field.
///
/// The field key is tried first; the anchor id is the fallback when the key is
/// absent or its label link is not on the page exactly once.
pub fn extract_catalog_field(doc: &Document, spec: &FieldSpec) -> Result<String> {
    match (&spec.key, &spec.id) {
        (Some(key), None) => extract_field_value(doc, key),
        (Some(key), Some(id)) => extract_field_value(doc, key).or_else(|err| {
            debug!(field = %spec.name, %err, "falling back to field anchor");
            extract_field_value_by_anchor(doc, id)
        }),
        (None, Some(id)) => extract_field_value_by_anchor(doc, id),
        (None, None) => Err(ExtractError::UnlocatableField {
            name: spec.name.clone(),
        }),
    }
}

/// Extracts every catalog field present on the page.
///
/// Fields whose label is missing or ambiguous, or whose value is empty, are
/// left out. Tabs in values become spaces.
pub fn extract_profile(doc: &Document, catalog: &FieldCatalog) -> Profile {
    let name = extract_country_name(doc)
        .map_err(|err| debug!(%err, "no country name"))
        .ok();
    let anthem_url = extract_anthem_url(doc)
        .map_err(|err| debug!(%err, "no anthem"))
        .ok()
        .map(String::from);

    let sections = catalog
        .sections()
        .iter()
        .filter_map(|section| {
            let fields: Vec<ProfileField> = section
                .fields
                .iter()
                .filter_map(|spec| match extract_catalog_field(doc, spec) {
                    Ok(value) if !value.is_empty() => Some(ProfileField {
                        name: spec.name.clone(),
                        key: spec.key.clone(),
                        value: value.replace('\t', " "),
                    }),
                    Ok(_) => None,
                    Err(err) => {
                        debug!(section = %section.name, field = %spec.name, %err, "skipping field");
                        None
                    }
                })
                .collect();
            (!fields.is_empty()).then(|| ProfileSection {
                name: section.name.clone(),
                fields,
            })
        })
        .collect();

    Profile {
        name,
        anthem_url,
        sections,
    }
}
