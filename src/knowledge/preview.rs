use crate::constants::PREVIEW_ELLIPSIS;
use crate::model::BlockNode;

/// Plain text of the first `max_blocks` text-bearing top-level blocks.
///
/// The window counts only paragraphs and headings, so a page that opens
/// with dividers or images still gets a preview; a strict "first N blocks of
/// any type" window would leave it empty. Every rich-text fragment is
/// joined with a single space, so blocks without text add nothing. Nested
/// children are not read.
pub fn extract_preview_text(blocks: &[BlockNode], max_blocks: usize) -> String {
    blocks
        .iter()
        .filter(|block| block.is_text_bearing())
        .take(max_blocks)
        .flat_map(BlockNode::plain_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts `text` to `max_chars` characters and appends `...` when it was longer.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS),
        None => text.to_string(),
    }
}
