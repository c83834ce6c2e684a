//! CLI entry-point for standalone text cleaning.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{read_input, LanguageHint},
    config::Settings,
    text::normalize::{normalize, NormalizeOptions},
};

/// Args for the `normalize` command. All passes run unless opted out.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input file; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Language hint for stopword selection.
    #[arg(long, default_value = "auto", value_enum)]
    pub language: LanguageHint,
    /// Keep URL substrings.
    #[arg(long)]
    pub keep_urls: bool,
    /// Keep HTML tags.
    #[arg(long)]
    pub keep_html: bool,
    /// Keep emoji.
    #[arg(long)]
    pub keep_emoji: bool,
    /// Keep punctuation characters.
    #[arg(long)]
    pub keep_punctuation: bool,
    /// Keep stopwords.
    #[arg(long)]
    pub keep_stopwords: bool,
}

#[instrument(skip(_settings))]
pub async fn run(args: Args, _settings: Settings) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let options = NormalizeOptions {
        strip_urls: !args.keep_urls,
        strip_html: !args.keep_html,
        strip_emoji: !args.keep_emoji,
        strip_punctuation: !args.keep_punctuation,
        strip_stopwords: !args.keep_stopwords,
        language: args.language.resolve(&raw),
    };
    println!("{}", normalize(&raw, &options));
    Ok(())
}
