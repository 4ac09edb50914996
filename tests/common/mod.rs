// tests/common/mod.rs
//! Shared fixtures: an in-memory Notion workspace behind the public
//! `Transport` trait, plus JSON builders for the objects it serves.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_srs::{HttpRequest, NotionClient, NotionId, RawResponse, Transport, TransportFailure};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const DATABASE: &str = "d9824bdc84454327be8b5b47500af6ce";

/// Serves queued responses per URL path and records every request.
#[derive(Default)]
pub struct MockNotion {
    routes: Mutex<HashMap<String, VecDeque<Result<RawResponse, TransportFailure>>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockNotion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> NotionClient {
        NotionClient::new(self.clone())
    }

    fn push(&self, path: String, response: Result<RawResponse, TransportFailure>) {
        self.routes
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push_back(response);
    }

    pub fn on_query(&self, database: &str, status: u16, body: Value) {
        self.push(
            format!("/v1/databases/{}/query", hyphenated(database)),
            Ok(RawResponse::new(status, body.to_string())),
        );
    }

    pub fn on_children(&self, parent: &str, status: u16, body: Value) {
        self.push(
            format!("/v1/blocks/{}/children", hyphenated(parent)),
            Ok(RawResponse::new(status, body.to_string())),
        );
    }

    pub fn on_children_failure(&self, parent: &str, message: &str) {
        self.push(
            format!("/v1/blocks/{}/children", hyphenated(parent)),
            Err(TransportFailure(message.to_string())),
        );
    }

    pub fn on_update(&self, page: &str, status: u16, body: Value) {
        self.push(
            format!("/v1/pages/{}", hyphenated(page)),
            Ok(RawResponse::new(status, body.to_string())),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of children listings requested for `parent`, across all pages.
    pub fn children_calls(&self, parent: &str) -> usize {
        let path = format!("/v1/blocks/{}/children", hyphenated(parent));
        self.requests()
            .iter()
            .filter(|r| r.url.path() == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockNotion {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportFailure> {
        let path = request.url.path().to_string();
        self.requests.lock().unwrap().push(request);
        self.routes
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportFailure(format!("unexpected request to {}", path))))
    }
}

pub fn hyphenated(id: &str) -> String {
    NotionId::parse(id).unwrap().to_hyphenated()
}

/// A 32-hex ID derived from a small number.
pub fn id(n: u32) -> String {
    format!("{:032x}", n)
}

pub fn list(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some()
    })
}

pub fn block(id: &str, kind: &str, text: &str, has_children: bool) -> Value {
    json!({
        "object": "block",
        "id": hyphenated(id),
        "type": kind,
        "has_children": has_children,
        kind: {
            "rich_text": [{"type": "text", "text": {"content": text}, "plain_text": text}],
            "color": "default"
        }
    })
}

pub fn row(id: &str, properties: Value) -> Value {
    json!({
        "object": "page",
        "id": hyphenated(id),
        "created_time": "2024-03-01T10:00:00.000Z",
        "last_edited_time": "2024-03-02T11:30:00.000Z",
        "parent": {"type": "database_id", "database_id": hyphenated(DATABASE)},
        "archived": false,
        "properties": properties,
        "url": format!("https://www.notion.so/{}", id)
    })
}

pub fn titled_row(id: &str, title: &str) -> Value {
    row(
        id,
        json!({
            "isProcessed": {"type": "checkbox", "checkbox": false},
            "Name": {"type": "title", "title": [{"plain_text": title}]}
        }),
    )
}
