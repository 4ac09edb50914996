// src/lib.rs
//! notion-srs library: pulls unprocessed knowledge items out of a Notion
//! database, fetches their nested content and packages a uniform result
//! envelope for a dashboard or a flashcard bot.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `SourceError`, `NotionErrorCode`, `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `RunConfig`, `SourceConfig`, `AggregationSettings`
//! - **Domain model**: `BlockNode`, `PageRecord`, `ListEnvelope`, `Parent`
//! - **Domain types**: `NotionId`, `ApiKey`, `ValidatedUrl`
//! - **API client**: `NotionClient`, `Transport`, pagination and tree fetching
//! - **Aggregation**: `NotionSource`, `fetch_from_all_sources`, envelopes, flashcards

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, SourceError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{AggregationSettings, CommandLineInput, RunConfig, RunMode, SourceConfig};

// --- Domain Model ---
pub use crate::model::{BlockNode, ListEnvelope, PageRecord, Parent};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    fetch_tree, list_children, walk_all_pages, HttpRequest, NotionClient, RawResponse,
    ReqwestTransport, Timeouts, Transport, TransportFailure, TreeFetch, TreeLimits, Walk,
};

// --- Aggregation ---
pub use crate::knowledge::{
    fetch_flashcards, fetch_from_all_sources, AggregateEnvelope, Flashcard, KnowledgeSource,
    NotionSource, OverallStatus, PageSummary, SourceOutcome, SourceReport,
};
