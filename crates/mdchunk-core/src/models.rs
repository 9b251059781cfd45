//! Value records produced by the chunking pipeline.
//!
//! Both types are created per chunking call and handed straight to the
//! caller; nothing here is retained between calls.

use serde::{Deserialize, Serialize};

/// A document span governed by one heading, or the leading span before any
/// heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, empty for leading content.
    pub heading: String,
    /// ATX depth 1–6, or 0 for leading content.
    pub level: u8,
    /// Full content including the heading line, without leading or trailing
    /// blank lines.
    pub text: String,
}

/// Whether a chunk carries a whole section or one window of it.
///
/// Serialized with a `section_type` tag so that `part`/`total_parts` only
/// appear on partial sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section_type", rename_all = "snake_case")]
pub enum SectionType {
    CompleteSection,
    PartialSection {
        /// 1-based window number.
        part: usize,
        total_parts: usize,
    },
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::CompleteSection => "complete_section",
            SectionType::PartialSection { .. } => "partial_section",
        }
    }
}

/// Metadata a chunk inherits from its owning section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub heading: String,
    pub heading_level: u8,
    #[serde(flatten)]
    pub section_type: SectionType,
}

/// A bounded passage of a document, ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Caller-owned name of the source document.
    pub file_identifier: String,
    /// Position within the document; contiguous from 0.
    pub chunk_index: usize,
    pub text: String,
    pub token_count: usize,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn heading(&self) -> &str {
        &self.metadata.heading
    }

    pub fn heading_level(&self) -> u8 {
        self.metadata.heading_level
    }

    pub fn section_type(&self) -> SectionType {
        self.metadata.section_type
    }

    /// `Some(part)` for partial sections.
    pub fn part(&self) -> Option<usize> {
        match self.metadata.section_type {
            SectionType::PartialSection { part, .. } => Some(part),
            SectionType::CompleteSection => None,
        }
    }

    /// `Some(total_parts)` for partial sections.
    pub fn total_parts(&self) -> Option<usize> {
        match self.metadata.section_type {
            SectionType::PartialSection { total_parts, .. } => Some(total_parts),
            SectionType::CompleteSection => None,
        }
    }
}
