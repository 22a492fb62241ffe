// ABOUTME: Page roles as CSS selectors plus a pre-compiled selector cache.
// ABOUTME: Every query the extractors make goes through get_or_compile so each selector is parsed once.

//! Selector roles and caching.
//!
//! The factbook markup changed shape between template epochs (table rows in
//! the old layout, flat `div`s in the new one), but a few class and attribute
//! conventions survived every revision. Each of those conventions is named here
//! as a role so the extractors never mention raw markup.
//!
//! Selector parsing is expensive relative to matching, so compiled selectors are
//! kept in a process-wide cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// The country-selector control.
pub const COUNTRY_SELECT: &str = "select";

/// One entry of the country-selector control.
pub const COUNTRY_OPTION: &str = "option";

/// Hyperlinks that may be a field's label anchor.
pub const LABEL_ANCHOR_CANDIDATE: &str = "a[href*='fieldkey=']";

/// The element wrapping a label anchor; marks the start of one field block.
pub const LABEL_CONTAINER: &str = "[class$='_light']";

/// Prefix of the `id` that later templates put on each label container.
pub const FIELD_ANCHOR_ID_PREFIX: &str = "field-anchor-";

/// An element holding (part of) a field value.
pub const VALUE_NODE: &str = ".category_data";

/// A short label annotating the value node that follows it.
pub const SUB_LABEL: &str = ".category";

/// Thread-safe cache of compiled selectors. Invalid selectors are cached as `None`.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` if `css` is not a valid selector.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    // Another thread may have inserted while we compiled.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Returns true if `el` matches `css`. Invalid selectors match nothing.
pub fn matches(css: &str, el: &ElementRef<'_>) -> bool {
    get_or_compile(css).is_some_and(|sel| sel.matches(el))
}

/// Selector for the label container whose id is `field-anchor-<anchor_id>`.
pub fn field_anchor(anchor_id: &str) -> String {
    format!("[id='{FIELD_ANCHOR_ID_PREFIX}{anchor_id}']")
}

/// Returns true if `el` starts a field block.
pub fn is_label_container(el: &ElementRef<'_>) -> bool {
    matches(LABEL_CONTAINER, el)
}

/// Returns true if `el` holds a field value.
pub fn is_value_node(el: &ElementRef<'_>) -> bool {
    matches(VALUE_NODE, el)
}

/// Returns true if `el` annotates a following value node.
///
/// Label containers in the new layout also carry the `category` class, so they
/// are excluded explicitly.
pub fn is_sub_label(el: &ElementRef<'_>) -> bool {
    matches(SUB_LABEL, el) && !is_label_container(el)
}

/// Compiles all role selectors up front.
pub fn precompile_roles() {
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    for css in [
        COUNTRY_SELECT,
        COUNTRY_OPTION,
        LABEL_ANCHOR_CANDIDATE,
        LABEL_CONTAINER,
        VALUE_NODE,
        SUB_LABEL,
    ] {
        if !cache.contains_key(css) {
            cache.insert(css.to_string(), Selector::parse(css).ok());
        }
    }
}
