// ABOUTME: Field value extraction keyed by the factbook's fieldkey query parameter or a field anchor id.
// ABOUTME: Finds the unique label, walks the data region to the next label, and joins value lines.

//! Field value extraction.
//!
//! A field block starts with a label container holding a link to the field's
//! definition (`notesanddefs.html?fieldkey=2011&...`). The value sits in the
//! sibling elements that follow the container, up to the next container.
//!
//! The same rules serve both template epochs:
//! - old: `<tr class="geo_light">` label rows followed by `<tr>` data rows;
//! - new: `<div class="category geo_light">` labels followed by flat `<div>`s.
//!
//! Key behaviors:
//! - The label anchor must match exactly once; zero or several is an error.
//! - A bare value node yields its trimmed text.
//! - A sub-label followed by a value node yields both texts concatenated as-is.
//! - Lines are joined with `\n`; an empty data region yields an empty value.
//!
//! Later templates also give each label container an `id` of the form
//! `field-anchor-<section>-<field>`. Fields introduced after the switch (the
//! terrorism section) have no field key, so [`extract_field_value_by_anchor`]
//! locates their block by that id instead.

use scraper::ElementRef;
use tracing::{debug, trace};

use crate::document::{element_text, Document, PageView};
use crate::error::{ExtractError, Result};
use crate::selectors::{
    field_anchor, is_label_container, is_sub_label, is_value_node, LABEL_ANCHOR_CANDIDATE,
};

/// Query parameter that carries the field key in label anchors.
const FIELD_KEY_MARKER: &str = "fieldkey=";

/// Characters that may end the field key inside an href.
const PARAM_SEPARATORS: &[char] = &['&', ';', '#'];

/// Extracts the text value recorded for `field_key` on the page.
///
/// Returns `IncorrectNumberOfFieldKeyLinks` unless exactly one label anchor
/// references the key.
pub fn extract_field_value(doc: &Document, field_key: &str) -> Result<String> {
    let page = doc.view();
    let anchor = find_label_anchor(&page, field_key)?;
    let value = region_value(data_region(label_container(anchor)));
    trace!(field_key, bytes = value.len(), "extracted field value");
    Ok(value)
}

/// Extracts the value of the field block whose label container has id
/// `field-anchor-<anchor_id>`.
///
/// Returns `IncorrectNumberOfFieldAnchors` unless exactly one element carries
/// that id.
pub fn extract_field_value_by_anchor(doc: &Document, anchor_id: &str) -> Result<String> {
    let page = doc.view();
    let containers = page.find_all(&field_anchor(anchor_id));
    let [container] = containers.as_slice() else {
        debug!(anchor_id, found = containers.len(), "field anchor not unique");
        return Err(ExtractError::field_anchors(anchor_id, containers.len()));
    };
    let value = region_value(data_region(Some(*container)));
    trace!(anchor_id, bytes = value.len(), "extracted field value");
    Ok(value)
}

/// Value lines of every element in the region, joined with `\n`.
fn region_value(region: Vec<ElementRef<'_>>) -> String {
    let lines: Vec<String> = region.into_iter().flat_map(value_lines).collect();
    if lines.is_empty() {
        debug!("label found but data region holds no values");
    }
    lines.join("\n")
}

/// Finds the single anchor whose href carries `fieldkey=<field_key>`.
fn find_label_anchor<'a>(page: &'a PageView<'_>, field_key: &str) -> Result<ElementRef<'a>> {
    let mut anchors = page
        .find_all(LABEL_ANCHOR_CANDIDATE)
        .into_iter()
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href_has_field_key(href, field_key))
        });

    match (anchors.next(), anchors.count()) {
        (Some(anchor), 0) => Ok(anchor),
        (first, rest) => {
            let found = rest + usize::from(first.is_some());
            debug!(field_key, found, "label anchor not unique");
            Err(ExtractError::field_key_links(field_key, found))
        }
    }
}

/// Returns true if `href` has `fieldkey=<field_key>` ending at a separator or the end.
///
/// `fieldkey=2011` does not match a request for `201`, and `fields/2011.html`
/// never matches because the key is not a query parameter there.
pub fn href_has_field_key(href: &str, field_key: &str) -> bool {
    href.match_indices(FIELD_KEY_MARKER).any(|(at, marker)| {
        href[at + marker.len()..]
            .strip_prefix(field_key)
            .is_some_and(|after| after.is_empty() || after.starts_with(PARAM_SEPARATORS))
    })
}

/// The anchor's nearest label container, or its parent when it has none.
fn label_container(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(is_label_container)
        .or_else(|| anchor.parent().and_then(ElementRef::wrap))
}

/// The siblings following a label container, up to the next container.
fn data_region(container: Option<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let Some(container) = container else {
        return vec![];
    };
    container
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !is_label_container(el))
        .collect()
}

/// Value lines under `root`, in document order.
///
/// A value node is never searched for nested value nodes, so text is not
/// counted twice when both a cell and its inner `div` carry the value class.
fn value_lines(root: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    collect_value_lines(root, &mut lines);
    lines
}

fn collect_value_lines(el: ElementRef<'_>, lines: &mut Vec<String>) {
    if is_value_node(&el) {
        lines.push(value_line(el));
        return;
    }
    for child in el.children().filter_map(ElementRef::wrap) {
        collect_value_lines(child, lines);
    }
}

/// One line for a value node, prefixed by its sub-label when it has one.
fn value_line(value: ElementRef<'_>) -> String {
    match sub_label_of(value) {
        Some(label) => {
            let mut line = element_text(&label);
            line.push_str(&element_text(&value));
            line
        }
        None => element_text(&value).trim().to_string(),
    }
}

/// The element sibling immediately before `value`, if it is a sub-label.
fn sub_label_of(value: ElementRef<'_>) -> Option<ElementRef<'_>> {
    value
        .prev_siblings()
        .find_map(ElementRef::wrap)
        .filter(is_sub_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NEW_LAYOUT: &str = r#"
        <html><body>
        <div class="answer">
          <div id="field" class="category geo_light"><a href="../docs/notesanddefs.html?fieldkey=2011&alphaletter=G&term=Geographic coordinates">Geographic coordinates:</a><a href="../fields/2011.html#as"><img src="../graphics/field_listing_on.gif"></a></div>
          <div class="category_data">27 00 S, 133 00 E</div>
          <div id="field" class="category geo_light"><a href="../docs/notesanddefs.html?fieldkey=2021&alphaletter=N&term=Natural hazards">Natural hazards:</a><a href="../fields/2021.html#as"><img src="../graphics/field_listing_on.gif"></a></div>
          <div class="category_data">cyclones along the coast; severe droughts; forest fires</div>
          <div><span class="category">volcanism: </span><span class="category_data">volcanic activity on Heard and McDonald Islands</span></div>
          <div id="field" class="category geo_light"><a href="../docs/notesanddefs.html?fieldkey=2113&alphaletter=G&term=Geography - note">Geography - note:</a></div>
        </div>
        </body></html>
    "#;

    #[test]
    fn single_value_line() {
        let doc = Document::parse(NEW_LAYOUT);
        assert_eq!(extract_field_value(&doc, "2011").unwrap(), "27 00 S, 133 00 E");
    }

    #[test]
    fn sub_label_line_keeps_source_spacing() {
        let doc = Document::parse(NEW_LAYOUT);
        assert_eq!(
            extract_field_value(&doc, "2021").unwrap(),
            "cyclones along the coast; severe droughts; forest fires\nvolcanism: volcanic activity on Heard and McDonald Islands"
        );
    }

    #[test]
    fn unknown_key_is_an_error() {
        let doc = Document::parse(NEW_LAYOUT);
        let err = extract_field_value(&doc, "9999").unwrap_err();
        assert!(err.is_incorrect_number_of_field_key_links());
        assert!(matches!(
            err,
            ExtractError::IncorrectNumberOfFieldKeyLinks { found: 0, .. }
        ));
    }

    #[test]
    fn empty_data_region_yields_empty_value() {
        let doc = Document::parse(NEW_LAYOUT);
        assert_eq!(extract_field_value(&doc, "2113").unwrap(), "");
    }

    #[test]
    fn duplicate_anchors_are_an_error() {
        let doc = Document::parse(
            r#"<div class="category geo_light"><a href="?fieldkey=2011&term=a">A:</a></div>
               <div class="category_data">one</div>
               <div class="category geo_light"><a href="?fieldkey=2011&term=b">B:</a></div>
               <div class="category_data">two</div>"#,
        );
        let err = extract_field_value(&doc, "2011").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::IncorrectNumberOfFieldKeyLinks { found: 2, .. }
        ));
    }

    #[test]
    fn longer_key_with_same_prefix_does_not_match() {
        let doc = Document::parse(
            r#"<div class="category geo_light"><a href="?fieldkey=20110&term=x">X:</a></div>
               <div class="category_data">wrong</div>"#,
        );
        assert!(extract_field_value(&doc, "2011")
            .unwrap_err()
            .is_incorrect_number_of_field_key_links());
    }

    #[test]
    fn old_layout_table_rows() {
        let doc = Document::parse(
            r#"<table>
                 <tr class="geo_light"><td><div class="category"><a href="../docs/notesanddefs.html?fieldkey=2011&term=Geographic%20coordinates">Geographic coordinates:</a> <a href="../fields/2011.html#aa"><img src="x.gif"></a></div></td></tr>
                 <tr><td class="category_data">  12 30 N, 69 58 W  </td></tr>
                 <tr class="geo_light"><td><div class="category"><a href="../docs/notesanddefs.html?fieldkey=2145&term=Map%20references">Map references:</a></div></td></tr>
                 <tr><td class="category_data">Central America and the Caribbean</td></tr>
               </table>"#,
        );
        assert_eq!(extract_field_value(&doc, "2011").unwrap(), "12 30 N, 69 58 W");
        assert_eq!(
            extract_field_value(&doc, "2145").unwrap(),
            "Central America and the Caribbean"
        );
    }

    #[test]
    fn nested_value_nodes_count_once() {
        let doc = Document::parse(
            r#"<table>
                 <tr class="geo_light"><td><a href="?fieldkey=2060&term=Coastline">Coastline:</a></td></tr>
                 <tr><td class="category_data"><div class="category_data">68.5 km</div></td></tr>
               </table>"#,
        );
        assert_eq!(extract_field_value(&doc, "2060").unwrap(), "68.5 km");
    }

    #[test]
    fn anchor_without_label_container_uses_parent() {
        let doc = Document::parse(
            r#"<div><p><a href="?fieldkey=2144">Location:</a></p>
                    <p class="category_data">Oceania</p></div>"#,
        );
        assert_eq!(extract_field_value(&doc, "2144").unwrap(), "Oceania");
    }

    #[test]
    fn several_value_nodes_join_with_newlines() {
        let doc = Document::parse(
            r#"<div class="category econ_light"><a href="?fieldkey=2052&x=1">Agriculture:</a></div>
               <div class="category_data">wheat</div>
               <div class="category_data">barley</div>
               <div><span class="category">note: </span><span class="category_data">sugarcane</span></div>"#,
        );
        assert_eq!(
            extract_field_value(&doc, "2052").unwrap(),
            "wheat\nbarley\nnote: sugarcane"
        );
    }

    const ANCHORED_LAYOUT: &str = r#"
        <div class="answer">
          <div id="field-anchor-terrorism-terrorist-groups-home-based" class="category terrorism_light"><a href="../fields/400.html">Terrorist group(s) - home based:</a></div>
          <div class="category_data">Islamic State of Iraq and ash-Sham (ISIS)</div>
          <div><span class="category">note: </span><span class="category_data">details about the group</span></div>
          <div id="field-anchor-terrorism-terrorist-groups-foreign-based" class="category terrorism_light"><a href="../fields/401.html">Terrorist group(s) - foreign based:</a></div>
          <div class="category_data">Hizballah</div>
        </div>
    "#;

    #[test]
    fn anchor_id_locates_block_without_field_key() {
        let doc = Document::parse(ANCHORED_LAYOUT);
        assert_eq!(
            extract_field_value_by_anchor(&doc, "terrorism-terrorist-groups-home-based").unwrap(),
            "Islamic State of Iraq and ash-Sham (ISIS)\nnote: details about the group"
        );
        assert_eq!(
            extract_field_value_by_anchor(&doc, "terrorism-terrorist-groups-foreign-based").unwrap(),
            "Hizballah"
        );
    }

    #[test]
    fn missing_anchor_id_is_an_error() {
        let doc = Document::parse(ANCHORED_LAYOUT);
        let err = extract_field_value_by_anchor(&doc, "terrorism").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::IncorrectNumberOfFieldAnchors { found: 0, .. }
        ));
    }

    #[test]
    fn href_marker_rules() {
        assert!(href_has_field_key("../docs/notesanddefs.html?fieldkey=2011&term=x", "2011"));
        assert!(href_has_field_key("notesanddefs.html?fieldkey=2011", "2011"));
        assert!(href_has_field_key("notesanddefs.html?fieldkey=2011#x", "2011"));
        assert!(href_has_field_key("notesanddefs.html?a=1;fieldkey=2011;b=2", "2011"));
        assert!(!href_has_field_key("notesanddefs.html?fieldkey=20110&term=x", "2011"));
        assert!(!href_has_field_key("notesanddefs.html?fieldkey=201&term=x", "2011"));
        assert!(!href_has_field_key("../fields/2011.html#as", "2011"));
    }
}
