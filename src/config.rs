//! Runtime configuration utilities for bilingual-ner.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding optional TSV lexicons (`english.tsv`, `chinese.tsv`)
    /// and downloaded lexicon packs.
    pub lexicon_dir: PathBuf,
    /// Maximum characters a single extractor call accepts.
    pub max_seq_len: usize,
    /// Placeholder character written over masked spans.
    pub mask_char: char,
    /// Longest entity surface form kept by the post-merge filter.
    pub max_entity_len: usize,
    /// Per-extractor wall-clock budget in seconds.
    pub extract_timeout_secs: u64,
    /// Base URL lexicon packs are fetched from.
    pub lexicon_base_url: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let lexicon_dir = env::var("LEXICON_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./lexicons"));
        let max_seq_len = env::var("MAX_SEQ_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4096);
        let mask_char = env::var("MASK_CHAR")
            .ok()
            .and_then(|v| v.chars().next())
            .unwrap_or('_');
        let max_entity_len = env::var("MAX_ENTITY_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(35);
        let extract_timeout_secs = env::var("EXTRACT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let lexicon_base_url = env::var("LEXICON_BASE_URL").unwrap_or_else(|_| {
            "https://github.com/bilingual-ner/lexicons/releases/latest/download".to_string()
        });

        std::fs::create_dir_all(&lexicon_dir).context("creating lexicon dir")?;

        Ok(Self {
            lexicon_dir,
            max_seq_len,
            mask_char,
            max_entity_len,
            extract_timeout_secs,
            lexicon_base_url,
        })
    }

    /// Convenience helper for paths inside the lexicon directory.
    pub fn join_lexicon<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.lexicon_dir.join(path)
    }
}
