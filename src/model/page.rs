use super::common::Parent;
use crate::types::{NotionId, ValidatedUrl};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A database row or standalone page, as returned by a query.
///
/// Properties are kept as raw JSON in the order Notion sent them; callers
/// read the few they care about (title candidates, flashcard fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: NotionId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    pub parent: Parent,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    pub url: ValidatedUrl,
}

impl PageRecord {
    /// Looks up a property by its exact name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Reads a checkbox property; missing or non-checkbox properties are `None`.
    pub fn checkbox(&self, name: &str) -> Option<bool> {
        self.property(name)
            .and_then(|prop| prop.get("checkbox"))
            .and_then(Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_query_row() {
        let page: PageRecord = serde_json::from_value(json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "2024-03-02T11:30:00.000Z",
            "created_by": {"object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4"},
            "parent": {"type": "database_id", "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce"},
            "archived": false,
            "properties": {
                "isProcessed": {"id": "a%3A", "type": "checkbox", "checkbox": false},
                "Name": {"id": "title", "type": "title", "title": []}
            },
            "url": "https://www.notion.so/Ownership-598337872cf94fdf8782e53db20768a5"
        }))
        .unwrap();

        assert_eq!(page.id.as_str(), "598337872cf94fdf8782e53db20768a5");
        assert_eq!(page.checkbox("isProcessed"), Some(false));
        assert_eq!(page.checkbox("Name"), None);
        let names: Vec<&str> = page.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["isProcessed", "Name"]);
    }

    #[test]
    fn rejects_missing_url() {
        let result = serde_json::from_value::<PageRecord>(json!({
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "2024-03-02T11:30:00.000Z",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {}
        }));
        assert!(result.is_err());
    }
}
