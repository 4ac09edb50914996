// src/api/pagination.rs
//! Cursor pagination over list endpoints.

use super::client::NotionClient;
use crate::error::SourceError;
use crate::model::{BlockNode, ListEnvelope};
use crate::types::{ApiKey, NotionId};
use std::future::Future;

/// Everything a pagination walk managed to collect.
///
/// A failed page ends the walk; items from earlier pages are kept and the
/// failure is recorded instead of propagated.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub failure: Option<SourceError>,
}

impl<T> Walk<T> {
    /// Whether every page up to `has_more = false` was retrieved.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Calls `fetch_page` with the cursor each page hands back until a page
/// reports no more results or a call fails.
///
/// The first call gets `None`; every later call gets exactly the
/// `next_cursor` of the page before it.
pub async fn walk_all_pages<T, F, Fut>(label: &str, mut fetch_page: F) -> Walk<T>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListEnvelope<T>, SourceError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        match fetch_page(cursor.take()).await {
            Ok(page) => {
                let next = page.continuation().map(str::to_string);
                items.extend(page.results);
                pages_fetched += 1;

                match next {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }
            Err(error) => {
                log::error!(
                    "Pagination of {} stopped after {} page(s), {} item(s): {}",
                    label,
                    pages_fetched,
                    items.len(),
                    error
                );
                return Walk {
                    items,
                    pages_fetched,
                    failure: Some(error),
                };
            }
        }
    }

    log::debug!(
        "Fetched {} item(s) of {} in {} page(s)",
        items.len(),
        label,
        pages_fetched
    );
    Walk {
        items,
        pages_fetched,
        failure: None,
    }
}

/// Collects every direct child of `parent` across all pages.
pub async fn list_children(
    client: &NotionClient,
    parent: &NotionId,
    credential: &ApiKey,
) -> Walk<BlockNode> {
    let label = format!("children of {}", parent);
    walk_all_pages(&label, |cursor| async move {
        client
            .list_children_page(parent, credential, cursor.as_deref())
            .await
    })
    .await
}
