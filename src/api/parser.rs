// src/api/parser.rs
//! Response normalizer: raw JSON into typed records.
//!
//! Bodies are checked in `Value` space first (error objects, the `object`
//! discriminator, the pagination invariant) and only then deserialized, so
//! a mismatch is reported as a [`SourceError`] naming what was wrong instead
//! of a serde message about some nested field.

use crate::error::{NotionErrorCode, SourceError};
use crate::model::{ExpectedShape, ListEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses a single object of the expected kind.
pub fn parse<T>(body: Value) -> Result<T, SourceError>
where
    T: ExpectedShape + DeserializeOwned,
{
    reject_error_object(&body)?;
    expect_object(&body, T::OBJECT, "response")?;
    deserialize(body)
}

/// Parses one page of a list endpoint whose items are all `T`.
///
/// Enforces that a page claiming `has_more` also carries a cursor; anything
/// else would leave the walker unable to continue.
pub fn parse_list<T>(body: Value) -> Result<ListEnvelope<T>, SourceError>
where
    T: ExpectedShape + DeserializeOwned,
{
    reject_error_object(&body)?;
    expect_object(&body, <ListEnvelope<T> as ExpectedShape>::OBJECT, "response")?;

    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::validation("list response has no 'results' array"))?;
    for (index, item) in results.iter().enumerate() {
        expect_object(item, T::OBJECT, &format!("results[{}]", index))?;
    }

    let envelope: ListEnvelope<T> = deserialize(body)?;
    if envelope.has_more && envelope.next_cursor.is_none() {
        return Err(SourceError::validation(
            "list response has has_more=true but no next_cursor",
        ));
    }
    Ok(envelope)
}

/// A 2xx body can still be a Notion error object.
fn reject_error_object(body: &Value) -> Result<(), SourceError> {
    if body.get("object").and_then(Value::as_str) != Some("error") {
        return Ok(());
    }

    let field = |name: &str| body.get(name).and_then(Value::as_str);
    let status = body
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(200);

    Err(SourceError::Remote {
        code: NotionErrorCode::from_api_response(field("code").unwrap_or("unknown_error")),
        message: field("message")
            .unwrap_or("Notion returned an error object")
            .to_string(),
        status,
    })
}

fn expect_object(value: &Value, expected: &str, location: &str) -> Result<(), SourceError> {
    match value.get("object").and_then(Value::as_str) {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(SourceError::validation(format!(
            "{}: expected object '{}', found '{}'",
            location, expected, found
        ))),
        None => Err(SourceError::validation(format!(
            "{}: missing 'object' discriminator (expected '{}')",
            location, expected
        ))),
    }
}

fn deserialize<T: DeserializeOwned>(body: Value) -> Result<T, SourceError> {
    serde_json::from_value(body).map_err(|e| {
        log::error!("Response did not match the expected record: {}", e);
        SourceError::validation(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockNode, PageRecord};
    use serde_json::json;

    fn block(id: &str) -> Value {
        json!({
            "object": "block",
            "id": id,
            "type": "paragraph",
            "has_children": false,
            "paragraph": {"rich_text": []}
        })
    }

    #[test]
    fn parses_block_list() {
        let list: ListEnvelope<BlockNode> = parse_list(json!({
            "object": "list",
            "results": [block("c0ffee00-0000-4000-8000-000000000001")],
            "next_cursor": "C2",
            "has_more": true
        }))
        .unwrap();
        assert_eq!(list.results.len(), 1);
        assert_eq!(list.continuation(), Some("C2"));
    }

    #[test]
    fn has_more_without_cursor_is_rejected() {
        let err = parse_list::<BlockNode>(json!({
            "object": "list",
            "results": [],
            "next_cursor": null,
            "has_more": true
        }))
        .unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn wrong_item_kind_is_rejected() {
        let err = parse_list::<PageRecord>(json!({
            "object": "list",
            "results": [block("c0ffee00-0000-4000-8000-000000000001")],
            "next_cursor": null,
            "has_more": false
        }))
        .unwrap_err();
        assert_eq!(err.code(), "validation_error");
        assert!(err.message().contains("results[0]"));
    }

    #[test]
    fn error_object_in_success_body() {
        let err = parse::<PageRecord>(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page"
        }))
        .unwrap_err();
        assert_eq!(err.code(), "object_not_found");
        assert_eq!(err.message(), "Could not find page");
    }

    #[test]
    fn missing_results_is_rejected() {
        let err = parse_list::<BlockNode>(json!({"object": "list", "has_more": false})).unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn missing_discriminator_is_rejected() {
        let err = parse::<BlockNode>(json!({"id": "x"})).unwrap_err();
        assert!(err.message().contains("missing 'object'"));
    }
}
