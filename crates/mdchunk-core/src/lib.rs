//! # mdchunk core
//!
//! Pure chunking logic for mdchunk: the tokenizer trait, the ATX heading
//! splitter, token-bounded windowing, document assembly and heading
//! re-injection.
//!
//! This crate does no I/O and holds no global state. The only shared
//! resource is a tokenizer, built once by the caller and passed in.
//!
//! ```text
//! document ─▶ headings ─▶ sections ─▶ assemble ─▶ chunks ─▶ contextualize
//!                                        │
//!                                        └─▶ window (oversized sections)
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tokenizer`] | `TokenCounter` trait and backends |
//! | [`headings`] | Split a document into sections |
//! | [`window`] | Split one section into overlapping windows |
//! | [`assemble`] | Produce the document's chunk sequence |
//! | [`contextualize`] | Re-stamp headings onto detached chunks |
//! | [`frontmatter`] | Strip `---` metadata blocks |
//! | [`models`] | `Section` and `Chunk` records |
//! | [`error`] | `ChunkError` |

pub mod assemble;
pub mod contextualize;
pub mod error;
pub mod frontmatter;
pub mod headings;
pub mod models;
pub mod tokenizer;
pub mod window;

pub use assemble::Chunker;
pub use error::ChunkError;
pub use models::{Chunk, ChunkMetadata, Section, SectionType};
pub use tokenizer::{check_tokenizer_name, tokenizer_from_name, TokenCounter, TOKENIZER_NAMES};
pub use window::ChunkLimits;
