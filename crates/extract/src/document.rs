// ABOUTME: Parsed page wrapper around scraper::Html, shareable across threads behind a mutex.
// ABOUTME: Decodes saved snapshot bytes by BOM, <meta> charset declaration, or chardetng detection.

//! Parsed factbook pages.
//!
//! A [`Document`] is built once from a snapshot and never mutated. scraper's
//! elements fill their id and class caches lazily, so the tree itself cannot be
//! read from two threads at once; queries go through a [`PageView`], which
//! holds the document's lock for as long as the view lives. A `&Document` can
//! therefore be handed to any number of threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::trace;

use crate::selectors::get_or_compile;

static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Matches both `<meta charset="x">` and the `http-equiv` content-type form.
static META_CHARSET: Lazy<BytesRegex> = Lazy::new(|| {
    BytesRegex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.-]+)"#).unwrap()
});

/// Snapshots declare their charset in `<head>`; nothing past this is scanned.
const META_SCAN_LIMIT: usize = 2048;

/// A parsed, immutable HTML page.
#[derive(Debug)]
pub struct Document {
    html: Mutex<Html>,
}

/// Read access to a document's tree. Other threads wait while a view is alive.
pub struct PageView<'a> {
    html: MutexGuard<'a, Html>,
}

impl Document {
    /// Parses an HTML page.
    ///
    /// A newline is inserted before every `<br>` so that line breaks encoded
    /// only as markup survive text retrieval.
    pub fn parse(html: &str) -> Self {
        let prepared = BR_TAG.replace_all(html, "\n$0");
        Self {
            html: Mutex::new(Html::parse_document(&prepared)),
        }
    }

    /// Decodes the raw bytes of a saved snapshot and parses them.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self::parse(&decode_snapshot(body))
    }

    /// Locks the tree for querying.
    pub fn view(&self) -> PageView<'_> {
        PageView {
            html: self.html.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

impl PageView<'_> {
    /// All elements matching `css`, in document order. Invalid selectors match nothing.
    pub fn find_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        get_or_compile(css)
            .map(|sel| self.html.select(&sel).collect())
            .unwrap_or_default()
    }

    /// The first element matching `css`.
    pub fn find(&self, css: &str) -> Option<ElementRef<'_>> {
        get_or_compile(css).and_then(|sel| self.html.select(&sel).next())
    }
}

/// Concatenated text of all descendant text nodes of `el`.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Decodes snapshot bytes: a byte-order mark wins, then the page's own
/// `<meta>` declaration, then detection over the whole body.
fn decode_snapshot(body: &[u8]) -> String {
    let encoding = Encoding::for_bom(body)
        .map(|(encoding, _)| encoding)
        .or_else(|| declared_charset(body))
        .unwrap_or_else(|| {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(body, true);
            detector.guess(None, true)
        });
    trace!(encoding = encoding.name(), "decoding snapshot");
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// The encoding named by a `<meta>` charset declaration near the top of the page.
fn declared_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SCAN_LIMIT)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}
