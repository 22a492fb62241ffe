// ABOUTME: Country list extraction from the page's country-selector control.
// ABOUTME: Reads option values of the first <select> and keeps their filename part in document order.

//! Country list extraction.
//!
//! Every factbook page carries a `<select>` listing all country pages. Only
//! the first control on the page is read; a page without one is an error, but
//! extra controls are not.

use tracing::debug;

use crate::document::Document;
use crate::error::{ExtractError, Result};
use crate::selectors::{get_or_compile, COUNTRY_OPTION, COUNTRY_SELECT};

/// Extracts the ordered list of country page filenames (e.g. `"xx.html"`).
///
/// Duplicates are preserved: several minor territories share one page.
/// Options without a `value` are prompts, not countries, and are skipped.
pub fn extract_country_list(doc: &Document) -> Result<Vec<String>> {
    let page = doc.view();
    let Some(control) = page.find(COUNTRY_SELECT) else {
        debug!("no country selector on page");
        return Err(ExtractError::IncorrectNumberOfSelects);
    };

    let Some(option_sel) = get_or_compile(COUNTRY_OPTION) else {
        return Ok(vec![]);
    };
    let codes: Vec<String> = control
        .select(&option_sel)
        .filter_map(|option| option.value().attr("value"))
        .filter_map(country_code_from_value)
        .map(str::to_string)
        .collect();

    debug!(count = codes.len(), "extracted country list");
    Ok(codes)
}

/// Strips the directory prefix from an option value, e.g. `"../geos/xx.html"` to `"xx.html"`.
///
/// Returns `None` when nothing is left after the last `/`.
pub fn country_code_from_value(value: &str) -> Option<&str> {
    let filename = value.rsplit('/').next().unwrap_or(value);
    if filename.is_empty() {
        None
    } else {
        Some(filename)
    }
}
