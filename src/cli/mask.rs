//! CLI entry-point for standalone term redaction.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{cli::read_input, config::Settings, text::mask as masking};

/// Args for the `mask` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input file; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Comma separated terms to redact.
    #[arg(long, value_delimiter = ',', required = true)]
    pub terms: Vec<String>,
    /// Override the configured placeholder character.
    #[arg(long)]
    pub mask_char: Option<char>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let mask_char = args.mask_char.unwrap_or(settings.mask_char);
    let spans = masking::coalesce(masking::find_term_spans(&raw, &args.terms));
    let masked = masking::mask(&raw, &spans, mask_char)?;
    info!(spans = spans.len(), "masked input");
    println!("{masked}");
    Ok(())
}
