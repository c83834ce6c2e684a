//! Lexicon files: tab-separated `term<TAB>label` rows layered over the
//! compiled-in seed entries.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::info;

/// Load a TSV lexicon, skipping blank rows and `#` comments. Later
/// duplicates of a term are ignored; the first row wins.
pub fn load_lexicon(path: &Path) -> Result<IndexMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("open lexicon {}", path.display()))?;

    let mut entries = IndexMap::new();
    for record in reader.records() {
        let record = record.context("read lexicon row")?;
        let term = record.get(0).map(str::trim).unwrap_or_default();
        let label = record.get(1).map(str::trim).unwrap_or_default();
        if term.is_empty() || label.is_empty() {
            continue;
        }
        entries
            .entry(term.to_string())
            .or_insert_with(|| label.to_uppercase());
    }
    info!(path = %path.display(), terms = entries.len(), "loaded lexicon");
    Ok(entries)
}

/// Seed entries merged with an optional on-disk lexicon. File entries win on
/// conflict so users can retag a seed term.
pub fn merge_entries(
    seeds: &[(&str, &str)],
    extra: Option<IndexMap<String, String>>,
) -> IndexMap<String, String> {
    let mut merged: IndexMap<String, String> = seeds
        .iter()
        .map(|(term, label)| ((*term).to_string(), (*label).to_string()))
        .collect();
    if let Some(extra) = extra {
        for (term, label) in extra {
            merged.insert(term, label);
        }
    }
    merged
}
