// src/knowledge/flashcard.rs
//! Flashcards stored as rows of an inline database.
//!
//! A study page holds one `child_database` block whose rows carry a
//! `Question` title, an `Answer` rich-text property and a `Created Date`.

use crate::api::{list_children, walk_all_pages, NotionClient};
use crate::constants::{ANSWER_PROPERTY, CREATED_DATE_PROPERTY, QUESTION_PROPERTY};
use crate::error::SourceError;
use crate::model::{plain_text_parts, PageRecord};
use crate::types::{ApiKey, NotionId};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{json, Value};

const CHILD_DATABASE_TYPE: &str = "child_database";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    pub id: NotionId,
    pub question: String,
    pub answer: String,
    pub created_date: NaiveDate,
}

impl Flashcard {
    /// Reads a flashcard from a database row.
    ///
    /// Question and answer must be present and non-empty. Without a usable
    /// `Created Date` the row's own creation time is used.
    pub fn from_row(row: &PageRecord) -> Result<Self, SourceError> {
        let question = text_of(row, QUESTION_PROPERTY, "title")?;
        let answer = text_of(row, ANSWER_PROPERTY, "rich_text")?;
        let created_date = row
            .property(CREATED_DATE_PROPERTY)
            .and_then(date_of)
            .unwrap_or_else(|| row.created_time.date_naive());

        Ok(Self {
            id: row.id.clone(),
            question,
            answer,
            created_date,
        })
    }
}

fn text_of(row: &PageRecord, property: &str, kind: &str) -> Result<String, SourceError> {
    let text = row
        .property(property)
        .and_then(|prop| prop.get(kind))
        .map(|rich_text| plain_text_parts(rich_text).concat())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(SourceError::validation(format!(
            "row {} has no '{}' text",
            row.id, property
        )))
    } else {
        Ok(text)
    }
}

/// Accepts both `date` and `created_time` properties.
fn date_of(prop: &Value) -> Option<NaiveDate> {
    let raw = prop
        .get("date")
        .and_then(|date| date.get("start"))
        .or_else(|| prop.get("created_time"))
        .and_then(Value::as_str)?;

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Finds the first inline database under `page` and reads every row as a
/// flashcard. Rows that are not valid flashcards are skipped with a warning.
///
/// A page without an inline database yields no cards. A failed listing
/// only fails the call when it left nothing to work with.
pub async fn fetch_flashcards(
    client: &NotionClient,
    page: &NotionId,
    credential: &ApiKey,
) -> Result<Vec<Flashcard>, SourceError> {
    let children = list_children(client, page, credential).await;
    let databases: Vec<&NotionId> = children
        .items
        .iter()
        .filter(|block| block.block_type == CHILD_DATABASE_TYPE)
        .map(|block| &block.id)
        .collect();

    let database = match (databases.first(), children.failure) {
        (Some(first), _) => *first,
        (None, Some(failure)) => return Err(failure),
        (None, None) => {
            log::warn!("No inline database found under page {}", page);
            return Ok(Vec::new());
        }
    };
    if databases.len() > 1 {
        log::warn!(
            "Page {} has {} inline databases; using the first ({})",
            page,
            databases.len(),
            database
        );
    }

    let label = format!("flashcards in {}", database);
    let rows = walk_all_pages(&label, |cursor| async move {
        let query = match cursor {
            Some(cursor) => json!({ "start_cursor": cursor }),
            None => json!({}),
        };
        client.query_database(database, credential, &query).await
    })
    .await;

    if rows.items.is_empty() {
        if let Some(failure) = rows.failure {
            return Err(failure);
        }
    }

    let cards: Vec<Flashcard> = rows
        .items
        .iter()
        .filter_map(|row| match Flashcard::from_row(row) {
            Ok(card) => Some(card),
            Err(e) => {
                log::warn!("Skipping row: {}", e);
                None
            }
        })
        .collect();

    log::info!(
        "Extracted {} flashcard(s) from {} row(s)",
        cards.len(),
        rows.items.len()
    );
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(properties: Value) -> PageRecord {
        serde_json::from_value(json!({
            "object": "page",
            "id": "598337872cf94fdf8782e53db20768a5",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "2024-03-02T11:30:00.000Z",
            "parent": {"type": "database_id", "database_id": "d9824bdc84454327be8b5b47500af6ce"},
            "properties": properties,
            "url": "https://www.notion.so/598337872cf94fdf8782e53db20768a5"
        }))
        .unwrap()
    }

    #[test]
    fn reads_question_answer_and_date() {
        let card = Flashcard::from_row(&row(json!({
            "Question": {"type": "title", "title": [
                {"plain_text": "What does "},
                {"plain_text": "Box<T>"},
                {"plain_text": " do?"}
            ]},
            "Answer": {"type": "rich_text", "rich_text": [{"plain_text": "Heap-allocates a T"}]},
            "Created Date": {"type": "date", "date": {"start": "2024-02-14", "end": null}}
        })))
        .unwrap();

        assert_eq!(card.question, "What does Box<T> do?");
        assert_eq!(card.answer, "Heap-allocates a T");
        assert_eq!(card.created_date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn created_time_property_and_fallback() {
        let card = Flashcard::from_row(&row(json!({
            "Question": {"title": [{"plain_text": "Q"}]},
            "Answer": {"rich_text": [{"plain_text": "A"}]},
            "Created Date": {"type": "created_time", "created_time": "2023-12-31T23:00:00.000Z"}
        })))
        .unwrap();
        assert_eq!(card.created_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let card = Flashcard::from_row(&row(json!({
            "Question": {"title": [{"plain_text": "Q"}]},
            "Answer": {"rich_text": [{"plain_text": "A"}]}
        })))
        .unwrap();
        assert_eq!(card.created_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn missing_answer_is_rejected() {
        let err = Flashcard::from_row(&row(json!({
            "Question": {"title": [{"plain_text": "Q"}]},
            "Answer": {"rich_text": []}
        })))
        .unwrap_err();
        assert_eq!(err.code(), "validation_error");
        assert!(err.message().contains("Answer"));
    }
}
