use crate::types::NotionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a page lives in the workspace hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    DatabaseId {
        database_id: NotionId,
    },
    PageId {
        page_id: NotionId,
    },
    BlockId {
        block_id: NotionId,
    },
    Workspace {
        #[serde(default)]
        workspace: bool,
    },
}

/// Collects the `plain_text` of every item in a rich-text array.
///
/// Anything that is not an array yields nothing; items without
/// `plain_text` contribute an empty string, the way Notion renders them.
pub fn plain_text_parts(rich_text: &Value) -> Vec<String> {
    rich_text
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.get("plain_text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parent_variants_deserialize() {
        let parent: Parent = serde_json::from_value(json!({
            "type": "database_id",
            "database_id": "a1b2c3d4-e5f6-7890-abcd-ef1234567890"
        }))
        .unwrap();
        assert!(matches!(parent, Parent::DatabaseId { .. }));

        let parent: Parent =
            serde_json::from_value(json!({"type": "workspace", "workspace": true})).unwrap();
        assert_eq!(parent, Parent::Workspace { workspace: true });
    }

    #[test]
    fn plain_text_parts_skips_non_arrays() {
        assert!(plain_text_parts(&json!(null)).is_empty());
        let parts = plain_text_parts(&json!([
            {"plain_text": "What is"},
            {"type": "equation"},
            {"plain_text": "Rust?"}
        ]));
        assert_eq!(parts, vec!["What is", "", "Rust?"]);
    }
}
