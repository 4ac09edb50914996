// src/config.rs
use crate::api::{Timeouts, TreeLimits};
use crate::constants::*;
use crate::error::SourceError;
use crate::types::{ApiKey, NotionId, ValidationError};
use clap::Parser;
use std::time::Duration;

/// Parsed command-line input. Credentials fall back to the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Database holding the knowledge items (URL or ID)
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database_id: Option<String>,

    /// Unprocessed items whose content is fetched per run
    #[arg(long, default_value_t = DEFAULT_ITEMS_PER_RUN)]
    pub limit: usize,

    /// Text-bearing top-level blocks that feed a preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_BLOCKS)]
    pub preview_blocks: usize,

    /// Preview length before it is cut and suffixed with "..."
    #[arg(long, default_value_t = DEFAULT_PREVIEW_CHARS)]
    pub preview_chars: usize,

    /// Deepest block level whose children are fetched
    #[arg(long, default_value_t = DEFAULT_MAX_TREE_DEPTH)]
    pub max_depth: usize,

    /// Blocks kept per page content tree
    #[arg(long, default_value_t = DEFAULT_MAX_TREE_NODES)]
    pub max_nodes: usize,

    /// Timeout for database queries and page updates, in seconds
    #[arg(long, default_value_t = DEFAULT_CALL_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Timeout for block-children listings, in seconds
    #[arg(long, default_value_t = BLOCK_CHILDREN_TIMEOUT.as_secs())]
    pub children_timeout_secs: u64,

    /// Flag each fetched item as processed once its content is retrieved
    #[arg(long, default_value_t = false)]
    pub mark_processed: bool,

    /// Extract flashcards from the first inline database under this page instead
    #[arg(long, value_name = "PAGE")]
    pub flashcards: Option<String>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Credentials and target of the Notion source, read once per invocation.
///
/// Kept unvalidated so that a missing or malformed value surfaces as a
/// `config_error` envelope at fetch time, before any HTTP call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
}

impl SourceConfig {
    pub fn new(api_key: Option<String>, database_id: Option<String>) -> Self {
        Self {
            api_key,
            database_id,
        }
    }

    /// Validated credential and database, or the reason the source cannot run.
    pub fn require(&self) -> Result<(ApiKey, NotionId), SourceError> {
        let api_key = self.credential()?;
        let database_id = present(&self.database_id)
            .ok_or_else(|| SourceError::config("Notion database ID not configured"))?;
        let database_id =
            NotionId::parse(database_id).map_err(|e| SourceError::config(e.to_string()))?;
        Ok((api_key, database_id))
    }

    /// Just the credential, for calls that do not touch the configured database.
    pub fn credential(&self) -> Result<ApiKey, SourceError> {
        let api_key = present(&self.api_key)
            .ok_or_else(|| SourceError::config("Notion API key not configured"))?;
        ApiKey::new(api_key).map_err(|e| SourceError::config(e.to_string()))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// How much of each knowledge item the aggregator fetches and summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    pub items_per_run: usize,
    pub preview_blocks: usize,
    pub preview_chars: usize,
    pub tree_limits: TreeLimits,
    pub mark_processed: bool,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            items_per_run: DEFAULT_ITEMS_PER_RUN,
            preview_blocks: DEFAULT_PREVIEW_BLOCKS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            tree_limits: TreeLimits::default(),
            mark_processed: false,
        }
    }
}

/// What the binary should do this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch unprocessed items from every configured source.
    Aggregate,
    /// Extract flashcards from the inline database under a page.
    Flashcards(NotionId),
}

/// Resolved configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: SourceConfig,
    pub settings: AggregationSettings,
    pub timeouts: Timeouts,
    pub mode: RunMode,
    pub compact: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Checks numeric bounds and the flashcard page reference.
    ///
    /// Credentials are deliberately not checked here; see [`SourceConfig`].
    pub fn resolve(cli: CommandLineInput) -> Result<Self, ValidationError> {
        let items_per_run = within(cli.limit, 1, NOTION_API_PAGE_SIZE)?;
        let preview_blocks = within(cli.preview_blocks, 1, 1000)?;
        let preview_chars = within(cli.preview_chars, 1, 100_000)?;
        let max_depth = within(cli.max_depth, 1, 100)?;
        let max_nodes = within(cli.max_nodes, 1, 100_000)?;
        let timeout = within(cli.timeout_secs, 1, 600)?;
        let children_timeout = within(cli.children_timeout_secs, 1, 600)?;

        let mode = match cli.flashcards.as_deref() {
            Some(page) => RunMode::Flashcards(NotionId::parse(page)?),
            None => RunMode::Aggregate,
        };

        Ok(Self {
            source: SourceConfig::new(cli.api_key, cli.database_id),
            settings: AggregationSettings {
                items_per_run,
                preview_blocks,
                preview_chars,
                tree_limits: TreeLimits {
                    max_depth,
                    max_nodes,
                },
                mark_processed: cli.mark_processed,
            },
            timeouts: Timeouts {
                default: Duration::from_secs(timeout),
                children: Duration::from_secs(children_timeout),
            },
            mode,
            compact: cli.compact,
            verbose: cli.verbose,
        })
    }
}

fn within<T>(value: T, min: T, max: T) -> Result<T, ValidationError>
where
    T: Copy + PartialOrd + TryInto<u64>,
{
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        let widen = |v: T| v.try_into().unwrap_or(u64::MAX);
        Err(ValidationError::OutOfBounds {
            value: widen(value),
            min: widen(min),
            max: widen(max),
        })
    }
}
