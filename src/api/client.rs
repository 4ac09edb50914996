// src/api/client.rs
//! HTTP client wrapper for the Notion API.
//!
//! [`NotionClient::call`] is the single place a request is built and its
//! outcome classified. Every failure comes back as a [`SourceError`] value;
//! nothing here panics or retries. The typed operations on top of it
//! (`query_database`, `list_children_page`, `mark_processed`) hand the
//! successful body to the parser.

use super::parser;
use super::transport::{HttpRequest, RawResponse, ReqwestTransport, Transport};
use crate::constants::*;
use crate::error::{NotionErrorCode, SourceError};
use crate::model::{BlockNode, ListEnvelope, PageRecord};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Method};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Per-call time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Database queries and page updates.
    pub default: Duration,
    /// Block-children listings, which Notion serves more slowly.
    pub children: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            default: DEFAULT_CALL_TIMEOUT,
            children: BLOCK_CHILDREN_TIMEOUT,
        }
    }
}

/// Notion API client over a pluggable [`Transport`].
#[derive(Clone)]
pub struct NotionClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    timeouts: Timeouts,
}

impl NotionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: NOTION_API_BASE_URL.to_string(),
            timeouts: Timeouts::default(),
        }
    }

    /// Client backed by a real reqwest connection pool.
    pub fn with_reqwest() -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(ReqwestTransport::new()?)))
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Performs one request and normalizes its outcome.
    ///
    /// `endpoint` is relative to the API base, e.g. `databases/{id}/query`.
    /// Query pairs are appended URL-encoded. On success the parsed JSON body
    /// is returned untouched; shape checks belong to the parser.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        credential: &ApiKey,
        body: Option<&Value>,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value, SourceError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint)).map_err(|e| {
            SourceError::config(format!("Invalid endpoint URL for '{}': {}", endpoint, e))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        log::debug!("{} {}", method, url);

        let request = HttpRequest {
            method,
            url,
            headers: Self::create_headers(credential)?,
            body: body.cloned(),
            timeout,
        };

        match self.transport.send(request).await {
            Ok(response) => classify_response(response),
            Err(failure) => Err(SourceError::Network {
                message: failure.to_string(),
            }),
        }
    }

    /// Creates the headers every Notion request carries.
    fn create_headers(credential: &ApiKey) -> Result<header::HeaderMap, SourceError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", credential.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header)
            .map_err(|e| SourceError::config(format!("Invalid API token format: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Queries a database, returning the first page of matching rows.
    pub async fn query_database(
        &self,
        database: &NotionId,
        credential: &ApiKey,
        query: &Value,
    ) -> Result<ListEnvelope<PageRecord>, SourceError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let body = self
            .call(
                Method::POST,
                &endpoint,
                credential,
                Some(query),
                &[],
                self.timeouts.default,
            )
            .await?;
        parser::parse_list(body)
    }

    /// Fetches one page of a block's direct children.
    pub async fn list_children_page(
        &self,
        parent: &NotionId,
        credential: &ApiKey,
        cursor: Option<&str>,
    ) -> Result<ListEnvelope<BlockNode>, SourceError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor.to_string()));
        }

        let body = self
            .call(
                Method::GET,
                &endpoint,
                credential,
                None,
                &query,
                self.timeouts.children,
            )
            .await?;
        parser::parse_list(body)
    }

    /// Flags a database row as processed so the next run skips it.
    pub async fn mark_processed(
        &self,
        page: &NotionId,
        credential: &ApiKey,
    ) -> Result<PageRecord, SourceError> {
        let endpoint = format!("pages/{}", page.to_hyphenated());
        let update = json!({
            "properties": {
                PROCESSED_FLAG_PROPERTY: { "checkbox": true }
            }
        });
        let body = self
            .call(
                Method::PATCH,
                &endpoint,
                credential,
                Some(&update),
                &[],
                self.timeouts.default,
            )
            .await?;
        parser::parse(body)
    }
}

/// Maps a raw response to the parsed body or a [`SourceError`].
///
/// Non-2xx bodies are read for Notion's `code` and `message`; when the body
/// has no code the status itself becomes the code (`HTTP_<status>`) and the
/// message falls back to the raw text.
pub(crate) fn classify_response(response: RawResponse) -> Result<Value, SourceError> {
    let RawResponse { status, body } = response;

    if (200..300).contains(&status) {
        return serde_json::from_str(&body).map_err(|e| {
            log::error!("Unparseable success body: {}", preview(&body));
            SourceError::InvalidJson {
                message: e.to_string(),
            }
        });
    }

    let parsed = serde_json::from_str::<Value>(&body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let message = field("message").unwrap_or_else(|| body.clone());

    log::warn!("Notion responded {}: {}", status, preview(&message));

    match field("code") {
        Some(code) => Err(SourceError::Remote {
            code: NotionErrorCode::from_api_response(&code),
            message,
            status,
        }),
        None => Err(SourceError::Http { status, message }),
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = text.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
