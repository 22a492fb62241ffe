// ABOUTME: National anthem audio URL extraction from the page's single <audio> element.
// ABOUTME: Resolves the relative src against the publication root.

use url::Url;

use crate::document::Document;
use crate::error::{ExtractError, Result};

/// Root that relative page resources resolve against.
pub const PUBLICATION_ROOT: &str = "https://www.cia.gov/library/publications/the-world-factbook/";

/// Extracts the absolute URL of the national anthem recording.
///
/// The page must carry exactly one `<audio>` element with a `src`.
pub fn extract_anthem_url(doc: &Document) -> Result<Url> {
    let page = doc.view();
    let tags = page.find_all("audio");
    let [audio] = tags.as_slice() else {
        return Err(ExtractError::IncorrectNumberOfAudioTags { found: tags.len() });
    };
    let src = audio
        .value()
        .attr("src")
        .ok_or(ExtractError::NoSrcAttribute)?;

    let root = Url::parse(PUBLICATION_ROOT)?;
    Ok(root.join(&src.replace("../", ""))?)
}
