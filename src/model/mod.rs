//! Typed records for the Notion responses the pipeline consumes.
//!
//! Records keep only the fields the pipeline relies on; everything else a
//! block carries stays available as raw JSON so nothing is lost when the
//! full content is handed to the caller.

mod block;
pub mod common;
mod list;
mod page;

pub use block::BlockNode;
pub use common::{plain_text_parts, Parent};
pub use list::ListEnvelope;
pub use page::PageRecord;

/// The value of the `object` discriminator a record expects.
///
/// The normalizer checks it before deserializing, so a page body fed to the
/// block parser is reported as a validation failure rather than silently
/// accepted.
pub trait ExpectedShape {
    const OBJECT: &'static str;
}

impl ExpectedShape for PageRecord {
    const OBJECT: &'static str = "page";
}

impl ExpectedShape for BlockNode {
    const OBJECT: &'static str = "block";
}

impl<T> ExpectedShape for ListEnvelope<T> {
    const OBJECT: &'static str = "list";
}
