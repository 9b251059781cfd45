//! # mdchunk CLI
//!
//! ## Usage
//!
//! ```bash
//! mdchunk [--config ./config/mdchunk.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mdchunk chunk <file>` | Print the chunks produced for one file |
//! | `mdchunk sections <file>` | Print the heading outline with token counts |
//! | `mdchunk stats <file>...` | Chunk and token totals for many files |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `warn`), e.g. `RUST_LOG=mdchunk_core=debug`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mdchunk::{chunk_cmd, config, stats};

/// mdchunk — heading-aware, token-bounded markdown chunking.
#[derive(Parser)]
#[command(
    name = "mdchunk",
    about = "mdchunk — heading-aware, token-bounded markdown chunking",
    version,
    long_about = "mdchunk splits markdown documents by ATX headings, sub-splits oversized \
    sections into overlapping token windows, and reports the resulting chunk sequence \
    ready for an embedding service."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, built-in defaults are used (500 max tokens,
    /// 100 overlap tokens, cl100k_base tokenizer).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Chunk a single markdown file and print the result.
    Chunk {
        /// Markdown file to chunk.
        file: PathBuf,

        /// File identifier to stamp on chunks. Defaults to the path.
        #[arg(long)]
        id: Option<String>,

        /// Re-stamp each chunk's heading onto its text.
        #[arg(long)]
        contextualize: bool,

        /// Print chunks as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Print the heading outline of a file with per-section token counts.
    ///
    /// Sections larger than `max_tokens` are marked `[split]`.
    Sections {
        /// Markdown file to inspect.
        file: PathBuf,
    },

    /// Summarize chunk and token counts for a set of files.
    ///
    /// Files that cannot be read or tokenized are reported and skipped.
    Stats {
        /// Markdown files to include.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunk {
            file,
            id,
            contextualize,
            json,
        } => {
            chunk_cmd::run_chunk(&cfg, &file, id.as_deref(), contextualize, json)?;
        }
        Commands::Sections { file } => {
            chunk_cmd::run_sections(&cfg, &file)?;
        }
        Commands::Stats { files } => {
            stats::run_stats(&cfg, &files).await?;
        }
    }

    Ok(())
}
