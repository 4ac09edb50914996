use super::common::plain_text_parts;
use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block types whose rich text feeds page previews.
const TEXT_BEARING_TYPES: [&str; 4] = ["paragraph", "heading_1", "heading_2", "heading_3"];

/// One node of a page's content tree.
///
/// `children` starts empty and is filled by the tree fetcher for nodes that
/// report `has_children`. The type-specific body (`paragraph`, `to_do`, ...)
/// and every other field Notion sent are kept in `payload` and serialized
/// back out flat, so a node renders like the API object plus its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub id: NotionId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub children: Vec<BlockNode>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl BlockNode {
    /// Whether this block contributes to a page preview.
    pub fn is_text_bearing(&self) -> bool {
        TEXT_BEARING_TYPES.contains(&self.block_type.as_str())
    }

    /// The type-specific body, e.g. `{"rich_text": [...], "color": ...}`.
    pub fn body(&self) -> Option<&Value> {
        self.payload.get(&self.block_type)
    }

    /// Plain text fragments of the block's rich text, in order.
    pub fn plain_text(&self) -> Vec<String> {
        self.body()
            .and_then(|body| body.get("rich_text"))
            .map(plain_text_parts)
            .unwrap_or_default()
    }
}
