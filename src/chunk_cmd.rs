//! `mdchunk chunk` and `mdchunk sections`.
//!
//! Both commands read a single markdown file, strip its frontmatter, and
//! print what the chunker makes of it. Nothing is stored.
//!
//! # Usage
//!
//! ```bash
//! mdchunk chunk notes/deploy.md
//! mdchunk chunk notes/deploy.md --json --contextualize
//! mdchunk sections notes/deploy.md
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use mdchunk_core::contextualize::{contextualize, render_heading};
use mdchunk_core::frontmatter::split_frontmatter;
use mdchunk_core::headings::split_sections;
use mdchunk_core::{Chunk, SectionType};
use serde::Serialize;

use crate::config::Config;

const PREVIEW_CHARS: usize = 100;

/// JSON shape for `mdchunk chunk --json`.
#[derive(Serialize)]
struct ChunkOutput<'a> {
    #[serde(flatten)]
    chunk: &'a Chunk,
    #[serde(skip_serializing_if = "Option::is_none")]
    contextualized_text: Option<String>,
}

fn read_markdown(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Chunk one file and return the chunks, using `id` (or the path) as the
/// file identifier.
pub fn chunk_file(config: &Config, path: &Path, id: Option<&str>) -> Result<Vec<Chunk>> {
    let raw = read_markdown(path)?;
    let (_, body) = split_frontmatter(&raw);
    let file_identifier = id
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());

    let chunker = config.chunking.build_chunker()?;
    Ok(chunker.chunk_document(&file_identifier, body)?)
}

/// CLI entry point for `mdchunk chunk <file>`.
pub fn run_chunk(
    config: &Config,
    path: &Path,
    id: Option<&str>,
    with_context: bool,
    json: bool,
) -> Result<()> {
    let chunks = chunk_file(config, path, id)?;

    if json {
        let out: Vec<ChunkOutput> = chunks
            .iter()
            .map(|chunk| ChunkOutput {
                chunk,
                contextualized_text: with_context.then(|| contextualize(chunk).into_owned()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Created {} chunks:", chunks.len());
    println!();
    for chunk in &chunks {
        let text = if with_context {
            contextualize(chunk)
        } else {
            chunk.text.as_str().into()
        };

        println!("Chunk {}", chunk.chunk_index);
        println!("  Heading: {}", chunk.heading());
        println!("  Tokens:  {}", chunk.token_count);
        match chunk.section_type() {
            SectionType::CompleteSection => println!("  Type:    complete_section"),
            SectionType::PartialSection { part, total_parts } => {
                println!("  Type:    partial_section ({}/{})", part, total_parts)
            }
        }
        println!("  Preview: {}...", preview(&text));
        println!();
    }

    Ok(())
}

/// CLI entry point for `mdchunk sections <file>`.
pub fn run_sections(config: &Config, path: &Path) -> Result<()> {
    let raw = read_markdown(path)?;
    let (_, body) = split_frontmatter(&raw);
    let chunker = config.chunking.build_chunker()?;
    let max = chunker.limits().max_tokens();

    for section in split_sections(body) {
        let tokens = chunker.tokenizer().count(&section.text)?;
        let label = if section.level == 0 {
            "(before first heading)".to_string()
        } else {
            render_heading(section.level, &section.heading)
        };
        let marker = if tokens > max { "  [split]" } else { "" };
        println!("{:<60} {:>7} tokens{}", label, tokens, marker);
    }

    Ok(())
}

/// First [`PREVIEW_CHARS`] characters on a single line.
fn preview(text: &str) -> String {
    text.chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
