// src/api/mod.rs
//! Notion API interaction: calling endpoints, walking cursors, fetching
//! content trees and turning raw bodies into typed records.
//!
//! Network access goes through the [`Transport`] trait; everything above it
//! is ordinary async code over values.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod transport;
pub mod tree;

pub use client::{NotionClient, Timeouts};
pub use pagination::{list_children, walk_all_pages, Walk};
pub use transport::{HttpRequest, RawResponse, ReqwestTransport, Transport, TransportFailure};
pub use tree::{fetch_tree, TreeFetch, TreeLimits};
