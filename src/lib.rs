//! # mdchunk
//!
//! Heading-aware, token-bounded markdown chunking for embedding and
//! retrieval pipelines.
//!
//! The chunking algorithm itself lives in [`mdchunk_core`]. This crate
//! adds the pieces around it: TOML configuration, the indexing pipeline
//! that hands chunks to an embedding service and a store, an in-memory
//! reference store, and the `mdchunk` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────────────┐   ┌───────────┐   ┌─────────┐
//! │ markdown │──▶│ frontmatter + chunk │──▶│ embedding │──▶│  store  │
//! │   text   │   │   (mdchunk-core)    │   │ (trait)   │   │ (trait) │
//! └──────────┘   └─────────────────────┘   └───────────┘   └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mdchunk chunk notes/deploy.md             # show chunks for one file
//! mdchunk sections notes/deploy.md          # heading outline with token counts
//! mdchunk stats notes/*.md                  # per-file chunk/token summary
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Stored document and chunk records |
//! | [`embedding`] | Embedding provider trait |
//! | [`store`] | Chunk store trait and in-memory backend |
//! | [`index`] | Chunk → embed → store pipeline |
//! | [`chunk_cmd`] | `chunk` and `sections` commands |
//! | [`stats`] | `stats` command |

pub mod chunk_cmd;
pub mod config;
pub mod embedding;
pub mod index;
pub mod models;
pub mod stats;
pub mod store;

pub use mdchunk_core;
