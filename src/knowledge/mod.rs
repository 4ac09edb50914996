// src/knowledge/mod.rs
//! Knowledge aggregation: pull unprocessed items from every configured
//! source and package them into one envelope.
//!
//! A source never fails the aggregation. Whatever goes wrong inside it is
//! reported in its own [`SourceOutcome`], and the envelope's overall status
//! drops to `partial`.

pub mod envelope;
pub mod flashcard;
mod preview;
mod title;

pub use envelope::{AggregateEnvelope, OverallStatus, PageSummary, SourceOutcome, SourceReport};
pub use flashcard::{fetch_flashcards, Flashcard};
pub use preview::{extract_preview_text, truncate_preview};
pub use title::extract_page_title;

use crate::api::{fetch_tree, NotionClient};
use crate::config::{AggregationSettings, SourceConfig};
use crate::constants::PROCESSED_FLAG_PROPERTY;
use crate::error::SourceError;
use crate::model::PageRecord;
use crate::types::ApiKey;
use serde_json::{json, Value};

/// A place knowledge items come from.
#[async_trait::async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Display name used in the aggregate envelope.
    fn name(&self) -> &str;

    /// Fetches this source's unprocessed items. Never fails; errors are
    /// reported inside the outcome.
    async fn fetch(&self) -> SourceOutcome;
}

/// Runs every source in order and collects their outcomes.
pub async fn fetch_from_all_sources(sources: &[&dyn KnowledgeSource]) -> AggregateEnvelope {
    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let outcome = source.fetch().await;
        reports.push(SourceReport {
            name: source.name().to_string(),
            outcome,
        });
    }

    let envelope = AggregateEnvelope::new(reports);
    log::info!(
        "Aggregated {} source(s): {:?}",
        envelope.sources.len(),
        envelope.overall_status
    );
    envelope
}

/// Query body selecting rows not yet turned into flashcards.
pub fn unprocessed_filter() -> Value {
    json!({
        "filter": {
            "property": PROCESSED_FLAG_PROPERTY,
            "checkbox": { "equals": false }
        }
    })
}

/// Unprocessed rows of one Notion database.
pub struct NotionSource {
    client: NotionClient,
    config: SourceConfig,
    settings: AggregationSettings,
}

impl NotionSource {
    pub const NAME: &'static str = "Notion";
    const SOURCE_TAG: &'static str = "notion";

    pub fn new(client: NotionClient, config: SourceConfig, settings: AggregationSettings) -> Self {
        Self {
            client,
            config,
            settings,
        }
    }

    async fn collect(&self) -> Result<SourceOutcome, SourceError> {
        let (credential, database) = self.config.require()?;

        let rows = self
            .client
            .query_database(&database, &credential, &unprocessed_filter())
            .await?;
        let total_count = rows.results.len();
        log::info!(
            "{} unprocessed item(s) in {}; fetching up to {}",
            total_count,
            database,
            self.settings.items_per_run
        );

        let mut pages = Vec::new();
        for row in rows.results.iter().take(self.settings.items_per_run) {
            pages.push(self.summarize(row, &credential).await);
        }

        Ok(SourceOutcome::success(Self::SOURCE_TAG, pages, total_count))
    }

    async fn summarize(&self, row: &PageRecord, credential: &ApiKey) -> PageSummary {
        let tree = fetch_tree(&self.client, &row.id, credential, self.settings.tree_limits).await;
        let preview = truncate_preview(
            &extract_preview_text(&tree.blocks, self.settings.preview_blocks),
            self.settings.preview_chars,
        );

        if self.settings.mark_processed && !tree.truncated {
            if let Err(e) = self.client.mark_processed(&row.id, credential).await {
                log::error!("Could not mark {} as processed: {}", row.id, e);
            }
        }

        PageSummary {
            id: row.id.clone(),
            url: row.url.clone(),
            title: extract_page_title(&row.properties),
            preview,
            full_content: tree.blocks,
            truncated: tree.truncated,
        }
    }
}

#[async_trait::async_trait]
impl KnowledgeSource for NotionSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self) -> SourceOutcome {
        match self.collect().await {
            Ok(outcome) => outcome,
            Err(error @ SourceError::Config { .. }) => {
                log::warn!("Notion source not configured: {}", error.message());
                SourceOutcome::failure(error.message(), &error)
            }
            Err(error) => {
                let transient = matches!(&error, SourceError::Remote { code, .. } if code.is_transient())
                    || matches!(error, SourceError::Network { .. });
                log::error!(
                    "Notion source failed ({}{}): {}",
                    error.code(),
                    if transient { ", transient" } else { "" },
                    error.message()
                );
                SourceOutcome::failure(format!("Notion API error: {}", error.message()), &error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::ScriptedTransport;
    use std::sync::Arc;

    struct Offline;

    #[async_trait::async_trait]
    impl KnowledgeSource for Offline {
        fn name(&self) -> &str {
            "Offline"
        }

        async fn fetch(&self) -> SourceOutcome {
            SourceOutcome::failure(
                "unreachable",
                &SourceError::Network {
                    message: "unreachable".into(),
                },
            )
        }
    }

    #[test]
    fn filter_selects_unprocessed_rows() {
        assert_eq!(
            unprocessed_filter(),
            json!({"filter": {"property": "isProcessed", "checkbox": {"equals": false}}})
        );
    }

    #[tokio::test]
    async fn missing_key_is_config_error_without_calls() {
        let transport = Arc::new(ScriptedTransport::new());
        let source = NotionSource::new(
            NotionClient::new(transport.clone()),
            SourceConfig::new(None, Some("d9824bdc84454327be8b5b47500af6ce".into())),
            AggregationSettings::default(),
        );

        let outcome = source.fetch().await;
        assert_eq!(
            outcome,
            SourceOutcome::Error {
                message: "Notion API key not configured".into(),
                code: "config_error".into(),
            }
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn one_failing_source_makes_envelope_partial() {
        let transport = Arc::new(ScriptedTransport::new());
        let notion = NotionSource::new(
            NotionClient::new(transport),
            SourceConfig::default(),
            AggregationSettings::default(),
        );

        let sources: [&dyn KnowledgeSource; 2] = [&notion, &Offline];
        let envelope = fetch_from_all_sources(&sources).await;
        assert_eq!(envelope.overall_status, OverallStatus::Partial);
        let names: Vec<&str> = envelope.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Notion", "Offline"]);
    }
}
