//! TOML configuration.
//!
//! Every section and field is optional; a missing file section falls back
//! to the defaults below. Validation runs once at load time so that a bad
//! configuration aborts before any document is read.
//!
//! ```toml
//! [chunking]
//! max_tokens = 500
//! overlap_tokens = 100
//! tokenizer = "cl100k_base"
//!
//! [indexing]
//! batch_size = 10
//! contextualize = false
//! ```

use anyhow::{Context, Result};
use mdchunk_core::{check_tokenizer_name, tokenizer_from_name, ChunkLimits, Chunker};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_overlap")]
    pub overlap_tokens: usize,
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap(),
            tokenizer: default_tokenizer(),
        }
    }
}

fn default_max_tokens() -> usize {
    ChunkLimits::DEFAULT_MAX_TOKENS
}
fn default_overlap() -> usize {
    ChunkLimits::DEFAULT_OVERLAP_TOKENS
}
fn default_tokenizer() -> String {
    "cl100k_base".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexingConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub contextualize: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            contextualize: false,
        }
    }
}

fn default_batch_size() -> usize {
    10
}

impl ChunkingConfig {
    /// Load the configured tokenizer and build a [`Chunker`].
    pub fn build_chunker(&self) -> Result<Chunker> {
        let tokenizer = tokenizer_from_name(&self.tokenizer)?;
        Ok(Chunker::with_limits(
            tokenizer,
            self.max_tokens,
            self.overlap_tokens,
        )?)
    }
}

impl Config {
    /// Check invariants that would otherwise only surface mid-batch.
    pub fn validate(&self) -> Result<()> {
        ChunkLimits::new(self.chunking.max_tokens, self.chunking.overlap_tokens)?;

        check_tokenizer_name(&self.chunking.tokenizer)?;

        if self.indexing.batch_size == 0 {
            anyhow::bail!("indexing.batch_size must be >= 1");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Load `path` when given, otherwise use the defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.chunking.max_tokens, 500);
        assert_eq!(config.chunking.overlap_tokens, 100);
        assert_eq!(config.chunking.tokenizer, "cl100k_base");
        assert_eq!(config.indexing.batch_size, 10);
        assert!(!config.indexing.contextualize);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse("[chunking]\nmax_tokens = 256\n\n[indexing]\ncontextualize = true\n").unwrap();
        assert_eq!(config.chunking.max_tokens, 256);
        assert_eq!(config.chunking.overlap_tokens, 100);
        assert!(config.indexing.contextualize);
    }

    #[test]
    fn test_overlap_not_below_max_rejected() {
        let err = parse("[chunking]\nmax_tokens = 100\noverlap_tokens = 100\n").unwrap_err();
        assert!(err.to_string().contains("overlap_tokens"));
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let err = parse("[chunking]\nmax_tokens = 0\noverlap_tokens = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_unknown_tokenizer_rejected() {
        let err = parse("[chunking]\ntokenizer = \"gpt2\"\n").unwrap_err();
        assert!(err.to_string().contains("gpt2"));
    }

    #[test]
    fn test_every_core_tokenizer_accepted() {
        for name in mdchunk_core::TOKENIZER_NAMES {
            let config = parse(&format!("[chunking]\ntokenizer = \"{}\"\n", name)).unwrap();
            assert_eq!(config.chunking.tokenizer, name);
        }
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(parse("[indexing]\nbatch_size = 0\n").is_err());
    }

    #[test]
    fn test_build_chunker() {
        let config = parse("[chunking]\ntokenizer = \"char\"\nmax_tokens = 50\noverlap_tokens = 5\n").unwrap();
        let chunker = config.chunking.build_chunker().unwrap();
        assert_eq!(chunker.tokenizer().name(), "char");
        assert_eq!(chunker.limits().max_tokens(), 50);
    }
}
