//! Heading re-injection for chunks consumed outside their document.
//!
//! Later windows of a split section lose the heading line that opened the
//! section. Before a chunk is sent on its own to an embedding or generation
//! service, [`contextualize`] stamps the heading back on top so the passage
//! keeps its topical identity.

use std::borrow::Cow;

use crate::models::Chunk;

/// Render a heading the way it appears in the source: `## Title`.
pub fn render_heading(level: u8, heading: &str) -> String {
    format!("{} {}", "#".repeat(level as usize), heading)
}

/// Return the chunk text with its heading line prepended when missing.
///
/// Chunks without a heading, and chunks whose text already starts with
/// the rendered heading, are returned unchanged.
///
/// ```rust
/// use mdchunk_core::contextualize::contextualize;
/// use mdchunk_core::models::{Chunk, ChunkMetadata, SectionType};
///
/// let chunk = Chunk {
///     file_identifier: "a.md".into(),
///     chunk_index: 4,
///     text: "second half of the section".into(),
///     token_count: 5,
///     metadata: ChunkMetadata {
///         heading: "Usage".into(),
///         heading_level: 2,
///         section_type: SectionType::PartialSection { part: 2, total_parts: 2 },
///     },
/// };
/// assert_eq!(contextualize(&chunk), "## Usage\n\nsecond half of the section");
/// ```
pub fn contextualize(chunk: &Chunk) -> Cow<'_, str> {
    let heading = chunk.heading();
    if heading.is_empty() {
        return Cow::Borrowed(&chunk.text);
    }

    let rendered = render_heading(chunk.heading_level(), heading);
    if chunk.text.starts_with(&rendered) {
        Cow::Borrowed(&chunk.text)
    } else {
        Cow::Owned(format!("{}\n\n{}", rendered, chunk.text))
    }
}
