// ABOUTME: Error types for factbook extraction operations.
// ABOUTME: Provides the ExtractError enum, a Result alias, and boolean helpers per error kind.

use thiserror::Error;

/// Errors that can occur while extracting values from a factbook page.
///
/// Every variant is terminal for the extraction attempt that produced it:
/// retrying against the same document yields the same error.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page has no country-selector `<select>` control.
    #[error("number of select elements != 1: no country selector found")]
    IncorrectNumberOfSelects,

    /// The label anchor for a field key was not found exactly once.
    #[error("number of fieldkey links for {key} != 1 (found {found})")]
    IncorrectNumberOfFieldKeyLinks { key: String, found: usize },

    /// The labelled block for a field anchor id was not found exactly once.
    #[error("number of field anchors for {id} != 1 (found {found})")]
    IncorrectNumberOfFieldAnchors { id: String, found: usize },

    /// A catalog field carries neither a field key nor an anchor id.
    #[error("field {name} has no field key or anchor id")]
    UnlocatableField { name: String },

    /// None of the country name locations held any text.
    #[error("country name not found in document")]
    NoCountryName,

    /// The page does not carry exactly one `<audio>` element.
    #[error("number of audio tags != 1 (found {found})")]
    IncorrectNumberOfAudioTags { found: usize },

    /// The `<audio>` element has no `src` attribute.
    #[error("no value found for src attribute")]
    NoSrcAttribute,

    /// The anthem location could not be resolved against the publication root.
    #[error("invalid anthem url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ExtractError {
    /// Creates an IncorrectNumberOfFieldKeyLinks error for `key`.
    pub fn field_key_links(key: impl Into<String>, found: usize) -> Self {
        ExtractError::IncorrectNumberOfFieldKeyLinks {
            key: key.into(),
            found,
        }
    }

    /// Creates an IncorrectNumberOfFieldAnchors error for `id`.
    pub fn field_anchors(id: impl Into<String>, found: usize) -> Self {
        ExtractError::IncorrectNumberOfFieldAnchors {
            id: id.into(),
            found,
        }
    }

    /// Returns true if this is an IncorrectNumberOfSelects error.
    pub fn is_incorrect_number_of_selects(&self) -> bool {
        matches!(self, ExtractError::IncorrectNumberOfSelects)
    }

    /// Returns true if this is an IncorrectNumberOfFieldKeyLinks error.
    pub fn is_incorrect_number_of_field_key_links(&self) -> bool {
        matches!(self, ExtractError::IncorrectNumberOfFieldKeyLinks { .. })
    }

    /// Returns true if this is an IncorrectNumberOfFieldAnchors error.
    pub fn is_incorrect_number_of_field_anchors(&self) -> bool {
        matches!(self, ExtractError::IncorrectNumberOfFieldAnchors { .. })
    }

    /// Returns true if this is a NoCountryName error.
    pub fn is_no_country_name(&self) -> bool {
        matches!(self, ExtractError::NoCountryName)
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
