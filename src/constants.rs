// src/constants.rs
//! Domain constants that define the operational boundaries of the pipeline.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! top to bottom tells you how the pipeline talks to Notion, how much it
//! fetches per run, and how it summarizes what it fetched.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Root of every Notion API endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Value sent in the `Notion-Version` header on every call.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Using it keeps the number of cursor
/// round-trips per parent as small as possible.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Per-call timeout for ordinary requests (database queries, page updates).
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-call timeout for block-children listing, which can be slow on large pages.
pub const BLOCK_CHILDREN_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Traversal guards
// ---------------------------------------------------------------------------

/// Deepest block nesting the tree fetcher will descend into.
///
/// Notion content is acyclic, so this only bounds worst-case latency.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 10;

/// Total number of block nodes the tree fetcher collects for one root.
pub const DEFAULT_MAX_TREE_NODES: usize = 1000;

// ---------------------------------------------------------------------------
// Knowledge aggregation
// ---------------------------------------------------------------------------

/// Checkbox property that marks a row as already turned into flashcards.
pub const PROCESSED_FLAG_PROPERTY: &str = "isProcessed";

/// How many unprocessed items get their full content fetched per run.
///
/// Each item costs at least one children call, so this bounds both latency
/// and exposure to the Notion rate limit.
pub const DEFAULT_ITEMS_PER_RUN: usize = 5;

/// Property names probed, in order, when looking for a page title.
pub const TITLE_PROPERTY_CANDIDATES: [&str; 4] = ["Name", "Title", "name", "title"];

/// Title reported when no candidate property carries one.
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// How many text-bearing top-level blocks feed the preview.
pub const DEFAULT_PREVIEW_BLOCKS: usize = 10;

/// Character budget of the preview before it is cut.
pub const DEFAULT_PREVIEW_CHARS: usize = 300;

/// Marker appended to a preview that was cut.
pub const PREVIEW_ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Flashcard rows
// ---------------------------------------------------------------------------

/// Title property holding the flashcard question.
pub const QUESTION_PROPERTY: &str = "Question";

/// Rich-text property holding the flashcard answer.
pub const ANSWER_PROPERTY: &str = "Answer";

/// Date property recording when the card was written.
pub const CREATED_DATE_PROPERTY: &str = "Created Date";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters of a response body quoted in a log line.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
