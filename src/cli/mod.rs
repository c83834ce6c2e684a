//! Command-line interface wiring for bilingual-ner.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::text::normalize::Language;
use crate::text::script::{self, Script};

pub mod extract;
pub mod fetch;
pub mod mask;
pub mod normalize;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Bilingual Chinese/English entity pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Normalize(args) => normalize::run(args, settings).await,
            Commands::Mask(args) => mask::run(args, settings).await,
            Commands::Fetch(args) => fetch::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract and merge named entities from both language backends.
    Extract(extract::Args),
    /// Clean raw text: URLs, markup, emoji, punctuation, stopwords.
    Normalize(normalize::Args),
    /// Redact occurrences of the given terms.
    Mask(mask::Args),
    /// Download lexicon packs into the lexicon directory.
    Fetch(fetch::Args),
}

/// Language hint for stopword selection.
#[derive(Clone, Debug, ValueEnum)]
pub enum LanguageHint {
    /// Pick by the dominant script of the input.
    Auto,
    /// Force the English stopword set.
    En,
    /// Force the Chinese stopword set.
    Zh,
}

impl LanguageHint {
    /// Resolve the hint against the text being processed.
    pub fn resolve(&self, text: &str) -> Language {
        match self {
            LanguageHint::En => Language::En,
            LanguageHint::Zh => Language::Zh,
            LanguageHint::Auto => match script::dominant_script(text) {
                Script::Cjk => Language::Zh,
                Script::Latin => Language::En,
            },
        }
    }
}

/// Output rendering for extraction results.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON.
    Json,
    /// Entities grouped by canonical label.
    Text,
}

/// Read the input document from a file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read stdin")?;
            Ok(buffer)
        }
    }
}
