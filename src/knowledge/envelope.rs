// src/knowledge/envelope.rs
//! The result envelopes handed to callers.
//!
//! Serialized shape of one source:
//!
//! ```json
//! {"name": "Notion", "status": "success", "source": "notion",
//!  "pages": [...], "total_count": 7, "fetched_count": 5}
//! {"name": "Notion", "status": "error", "message": "...", "code": "rate_limited"}
//! ```

use crate::error::SourceError;
use crate::model::BlockNode;
use crate::types::{NotionId, ValidatedUrl};
use serde::Serialize;

/// One fetched knowledge item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub id: NotionId,
    pub url: ValidatedUrl,
    pub title: String,
    pub preview: String,
    pub full_content: Vec<BlockNode>,
    /// Part of `full_content` could not be fetched.
    pub truncated: bool,
}

/// What a single source produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Success {
        source: String,
        pages: Vec<PageSummary>,
        /// Unprocessed items the query returned.
        total_count: usize,
        /// Items whose content was fetched.
        fetched_count: usize,
    },
    Error {
        message: String,
        code: String,
    },
}

impl SourceOutcome {
    pub fn success(source: impl Into<String>, pages: Vec<PageSummary>, total_count: usize) -> Self {
        Self::Success {
            source: source.into(),
            fetched_count: pages.len(),
            pages,
            total_count,
        }
    }

    /// Error outcome with `message` for humans and the error's code for machines.
    pub fn failure(message: impl Into<String>, error: &SourceError) -> Self {
        Self::Error {
            message: message.into(),
            code: error.code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A source's outcome under its display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Success,
    Partial,
}

/// Outcome of one aggregation run across every configured source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateEnvelope {
    pub sources: Vec<SourceReport>,
    pub overall_status: OverallStatus,
}

impl AggregateEnvelope {
    /// `success` only when every source succeeded.
    pub fn new(sources: Vec<SourceReport>) -> Self {
        let overall_status = if sources.iter().all(|s| s.outcome.is_success()) {
            OverallStatus::Success
        } else {
            OverallStatus::Partial
        };
        Self {
            sources,
            overall_status,
        }
    }
}
