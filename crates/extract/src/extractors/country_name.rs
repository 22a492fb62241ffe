// ABOUTME: Country name extraction with fallbacks for each template epoch.
// ABOUTME: Tries .countryName, then .region, then the second arial font tag, and title-cases the result.

use tracing::trace;

use crate::document::{element_text, Document};
use crate::error::{ExtractError, Result};

/// Places the country name has lived in, newest layout first.
/// Each entry is a selector and the index of the match to read.
const NAME_LOCATIONS: &[(&str, usize)] = &[
    (".countryName", 0),
    (".region", 0),
    ("font[face='arial']", 1),
];

/// Extracts the page's country name, title-cased (`"KOREA, SOUTH"` becomes `"Korea, South"`).
pub fn extract_country_name(doc: &Document) -> Result<String> {
    let page = doc.view();
    for &(css, index) in NAME_LOCATIONS {
        let Some(el) = page.find_all(css).into_iter().nth(index) else {
            continue;
        };
        let text = element_text(&el);
        let name = text.trim();
        if !name.is_empty() {
            trace!(css, name, "found country name");
            return Ok(title_case(name));
        }
    }
    Err(ExtractError::NoCountryName)
}

/// Lowercases `s` and uppercases the first letter of every word.
///
/// Anything other than a letter, digit or underscore separates words, so
/// `"cote d'ivoire"` becomes `"Cote D'Ivoire"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars().flat_map(char::to_lowercase) {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
