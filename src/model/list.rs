use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated list endpoint.
///
/// `next_cursor` is only meaningful for the query that produced it and must
/// never be replayed against another parent or database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> ListEnvelope<T> {
    /// The cursor to continue with, or `None` when this is the last page.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}
