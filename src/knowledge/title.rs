use crate::constants::{TITLE_PROPERTY_CANDIDATES, UNTITLED_PAGE};
use crate::model::plain_text_parts;
use indexmap::IndexMap;
use serde_json::Value;

/// Picks a display title from a row's properties.
///
/// Candidates are probed in order; the first whose `title` array is
/// non-empty wins and its plain-text parts are joined with a space.
pub fn extract_page_title(properties: &IndexMap<String, Value>) -> String {
    TITLE_PROPERTY_CANDIDATES
        .iter()
        .filter_map(|name| properties.get(*name))
        .filter_map(|prop| prop.get("title"))
        .filter(|title| title.as_array().is_some_and(|items| !items.is_empty()))
        .map(|title| plain_text_parts(title).join(" "))
        .next()
        .unwrap_or_else(|| UNTITLED_PAGE.to_string())
}
