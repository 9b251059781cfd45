//! Document-level chunk assembly.
//!
//! Combines the heading splitter and the window splitter into one ordered
//! chunk sequence per document:
//!
//! - A section that fits in `max_tokens` becomes one
//!   [`SectionType::CompleteSection`] chunk with the section text verbatim.
//! - A larger section is split with [`split_windows`] and every window
//!   becomes a [`SectionType::PartialSection`] chunk numbered `1..=N`.
//!
//! `chunk_index` is a single counter across the whole document, so the
//! emitted indices are always `0, 1, …, N-1`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mdchunk_core::assemble::Chunker;
//! use mdchunk_core::tokenizer::CharTokenizer;
//! use mdchunk_core::window::ChunkLimits;
//!
//! let chunker = Chunker::new(Arc::new(CharTokenizer), ChunkLimits::default());
//! let chunks = chunker.chunk_document("notes.md", "# A\ntext1\n\n# B\ntext2").unwrap();
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].chunk_index, 1);
//! assert_eq!(chunks[1].heading(), "B");
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::ChunkError;
use crate::headings::split_sections;
use crate::models::{Chunk, ChunkMetadata, Section, SectionType};
use crate::tokenizer::TokenCounter;
use crate::window::{split_windows, ChunkLimits};

/// Stateless chunking entry point.
///
/// Holds a shared, immutable tokenizer and validated limits. Cheap to
/// clone and safe to use from many threads at once; each call works only
/// on its own inputs.
#[derive(Clone)]
pub struct Chunker {
    tokenizer: Arc<dyn TokenCounter>,
    limits: ChunkLimits,
}

impl Chunker {
    pub fn new(tokenizer: Arc<dyn TokenCounter>, limits: ChunkLimits) -> Self {
        Self { tokenizer, limits }
    }

    /// Validate raw limits and build a chunker.
    ///
    /// Fails with [`ChunkError::Config`] before any document is seen when
    /// `overlap_tokens >= max_tokens` or `max_tokens == 0`.
    pub fn with_limits(
        tokenizer: Arc<dyn TokenCounter>,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Self, ChunkError> {
        Ok(Self::new(
            tokenizer,
            ChunkLimits::new(max_tokens, overlap_tokens)?,
        ))
    }

    pub fn tokenizer(&self) -> &dyn TokenCounter {
        self.tokenizer.as_ref()
    }

    pub fn limits(&self) -> &ChunkLimits {
        &self.limits
    }

    /// Chunk a whole document.
    ///
    /// All or nothing: on a tokenizer failure no chunks are returned for
    /// the document.
    pub fn chunk_document(
        &self,
        file_identifier: &str,
        markdown: &str,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let sections = split_sections(markdown);
        let mut chunks = Vec::new();

        for section in &sections {
            let start_index = chunks.len();
            self.chunk_section(file_identifier, section, start_index, &mut chunks)?;
        }

        debug!(
            file = file_identifier,
            sections = sections.len(),
            chunks = chunks.len(),
            "chunked document"
        );
        Ok(chunks)
    }

    /// Append the chunks for one section, numbering from `start_index`.
    fn chunk_section(
        &self,
        file_identifier: &str,
        section: &Section,
        start_index: usize,
        out: &mut Vec<Chunk>,
    ) -> Result<(), ChunkError> {
        let token_count = self.tokenizer.count(&section.text)?;

        if token_count <= self.limits.max_tokens() {
            out.push(make_chunk(
                file_identifier,
                start_index,
                section,
                section.text.clone(),
                token_count,
                SectionType::CompleteSection,
            ));
            return Ok(());
        }

        let windows = split_windows(self.tokenizer.as_ref(), &section.text, &self.limits)?;
        let total_parts = windows.len();
        debug!(
            heading = %section.heading,
            tokens = token_count,
            parts = total_parts,
            "section exceeds max_tokens"
        );

        for (i, window) in windows.into_iter().enumerate() {
            let count = self.tokenizer.count(&window)?;
            out.push(make_chunk(
                file_identifier,
                start_index + i,
                section,
                window,
                count,
                SectionType::PartialSection {
                    part: i + 1,
                    total_parts,
                },
            ));
        }
        Ok(())
    }
}

fn make_chunk(
    file_identifier: &str,
    chunk_index: usize,
    section: &Section,
    text: String,
    token_count: usize,
    section_type: SectionType,
) -> Chunk {
    Chunk {
        file_identifier: file_identifier.to_string(),
        chunk_index,
        text,
        token_count,
        metadata: ChunkMetadata {
            heading: section.heading.clone(),
            heading_level: section.level,
            section_type,
        },
    }
}
