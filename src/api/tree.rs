// src/api/tree.rs
//! Recursive content-tree fetcher.
//!
//! Walks a page depth-first: list the children, then for every child that
//! reports `has_children`, fetch its subtree before moving to the next
//! sibling. Depth and node-count ceilings bound the walk; hitting either,
//! or any failed listing, marks the result as truncated instead of failing.

use super::client::NotionClient;
use super::pagination::list_children;
use crate::constants::{DEFAULT_MAX_TREE_DEPTH, DEFAULT_MAX_TREE_NODES};
use crate::model::BlockNode;
use crate::types::{ApiKey, NotionId};
use futures::future::{BoxFuture, FutureExt};

/// Ceilings for one tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Deepest level whose children are listed; the root's children are level 1.
    pub max_depth: usize,
    /// Total nodes kept across the whole tree.
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_TREE_DEPTH,
            max_nodes: DEFAULT_MAX_TREE_NODES,
        }
    }
}

/// The fetched tree and how much of it there is.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeFetch {
    pub blocks: Vec<BlockNode>,
    /// Some subtree is missing: a listing failed or a ceiling was reached.
    pub truncated: bool,
    pub node_count: usize,
}

struct WalkState {
    limits: TreeLimits,
    nodes: usize,
    truncated: bool,
}

/// Fetches the full content tree under `root`.
///
/// Every node with `has_children = true` triggers exactly one recursive
/// listing for its own ID, unless a ceiling stops the walk first.
pub async fn fetch_tree(
    client: &NotionClient,
    root: &NotionId,
    credential: &ApiKey,
    limits: TreeLimits,
) -> TreeFetch {
    let mut state = WalkState {
        limits,
        nodes: 0,
        truncated: false,
    };
    let blocks = fetch_subtree(client, root.clone(), credential, 1, &mut state).await;

    if state.truncated {
        log::warn!(
            "Content tree of {} is incomplete ({} node(s) kept)",
            root,
            state.nodes
        );
    }

    TreeFetch {
        blocks,
        truncated: state.truncated,
        node_count: state.nodes,
    }
}

fn fetch_subtree<'a>(
    client: &'a NotionClient,
    parent: NotionId,
    credential: &'a ApiKey,
    depth: usize,
    state: &'a mut WalkState,
) -> BoxFuture<'a, Vec<BlockNode>> {
    async move {
        let walk = list_children(client, &parent, credential).await;
        if !walk.is_complete() {
            state.truncated = true;
        }

        let mut nodes = walk.items;
        let room = state.limits.max_nodes.saturating_sub(state.nodes);
        if nodes.len() > room {
            log::warn!(
                "Node ceiling of {} reached under {}; dropping {} block(s)",
                state.limits.max_nodes,
                parent,
                nodes.len() - room
            );
            nodes.truncate(room);
            state.truncated = true;
        }
        state.nodes += nodes.len();

        for node in nodes.iter_mut().filter(|n| n.has_children) {
            if depth >= state.limits.max_depth {
                log::debug!("Depth ceiling reached at {}", node.id);
                state.truncated = true;
                continue;
            }
            if state.nodes >= state.limits.max_nodes {
                state.truncated = true;
                continue;
            }
            node.children =
                fetch_subtree(client, node.id.clone(), credential, depth + 1, state).await;
        }

        nodes
    }
    .boxed()
}
