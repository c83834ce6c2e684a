//! CLI entry-point for the full extract-and-merge pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::{read_input, LanguageHint, OutputFormat},
    config::Settings,
    ner::{labels, types::MergedEntity, Pipeline},
    text::{
        mask as masking,
        normalize::{self, NormalizeOptions},
    },
};

/// Documents processed concurrently in `--lines` mode.
const CONCURRENCY: usize = 2;

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Input file; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Treat each input line as its own document and emit JSONL.
    #[arg(long)]
    pub lines: bool,
    /// Comma separated terms to redact before extraction.
    #[arg(long, value_delimiter = ',')]
    pub redact: Vec<String>,
    /// Language hint for stopword selection.
    #[arg(long, default_value = "auto", value_enum)]
    pub language: LanguageHint,
    /// Also strip punctuation during normalization.
    #[arg(long)]
    pub strip_punctuation: bool,
    /// Also strip stopwords during normalization.
    #[arg(long)]
    pub strip_stopwords: bool,
    /// Output format.
    #[arg(long, default_value = "json", value_enum)]
    pub format: OutputFormat,
}

/// Serialized entity shape: span offsets, tags, contributing backends, and
/// the surface text. Offsets index the normalized text, not the raw input.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    pub start: usize,
    pub end: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_labels: Vec<String>,
    pub sources: Vec<String>,
    pub text: String,
}

impl From<MergedEntity> for EntityRecord {
    fn from(entity: MergedEntity) -> Self {
        Self {
            start: entity.span.start,
            end: entity.span.end,
            label: entity.label.as_str().to_string(),
            secondary_labels: entity
                .secondary_labels
                .iter()
                .map(|tag| tag.as_str().to_string())
                .collect(),
            sources: entity.sources.iter().map(|s| s.to_string()).collect(),
            text: entity.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DocumentOutput {
    index: usize,
    text: String,
    entities: Vec<EntityRecord>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let pipeline = Pipeline::load(&settings).await?;

    let documents: Vec<String> = if args.lines {
        raw.lines().map(str::to_string).collect()
    } else {
        vec![raw]
    };
    info!(documents = documents.len(), "running extraction");

    let args_ref = &args;
    let settings_ref = &settings;
    let pipeline_ref = &pipeline;
    let results: Vec<Result<DocumentOutput>> = stream::iter(documents.into_iter().enumerate())
        .map(|(index, document)| async move {
            process_document(index, document, args_ref, pipeline_ref, settings_ref).await
        })
        .buffered(CONCURRENCY)
        .collect()
        .await;
    let outputs = results.into_iter().collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Json if args.lines => {
            for output in &outputs {
                println!("{}", serde_json::to_string(output)?);
            }
        }
        OutputFormat::Json => {
            for output in &outputs {
                println!("{}", serde_json::to_string_pretty(&output.entities)?);
            }
        }
        OutputFormat::Text => {
            for output in &outputs {
                render_text(output, args.lines);
            }
        }
    }
    Ok(())
}

async fn process_document(
    index: usize,
    raw: String,
    args: &Args,
    pipeline: &Pipeline,
    settings: &Settings,
) -> Result<DocumentOutput> {
    let language = args.language.resolve(&raw);
    let mut options = NormalizeOptions::for_extraction(language);
    options.strip_punctuation = args.strip_punctuation;
    options.strip_stopwords = args.strip_stopwords;
    let mut text = normalize::normalize(&raw, &options);

    if !args.redact.is_empty() {
        let spans = masking::coalesce(masking::find_term_spans(&text, &args.redact));
        text = masking::mask(&text, &spans, settings.mask_char)
            .with_context(|| format!("masking document {index}"))?;
    }

    let entities = pipeline
        .annotate(&text)
        .await
        .with_context(|| format!("extracting document {index} ({})", excerpt(&text)))?;
    Ok(DocumentOutput {
        index,
        entities: entities.into_iter().map(EntityRecord::from).collect(),
        text,
    })
}

fn render_text(output: &DocumentOutput, show_index: bool) {
    if show_index {
        println!("# document {}", output.index);
    }
    let mut grouped: IndexMap<&str, Vec<&EntityRecord>> = IndexMap::new();
    for record in &output.entities {
        grouped
            .entry(labels::canonical(&record.label))
            .or_default()
            .push(record);
    }
    for (label, records) in &grouped {
        println!("{label}:");
        for record in records {
            println!(
                "  [{}..{}] {} ({})",
                record.start,
                record.end,
                record.text,
                record.sources.join("+")
            );
        }
    }
}

fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_CHARS).collect();
    format!("{head}...")
}
