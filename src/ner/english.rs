//! English entity extraction: tag patterns plus a gazetteer lexicon.
//!
//! Lightweight stand-in for a transformer backend; swap behind the
//! [`Extractor`] trait when a model-backed implementation lands.

use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::Settings;
use crate::error::ExtractionError;
use crate::ner::types::{EntityCandidate, EntityLabel, Source, Span};
use crate::ner::{lexicon, retain_longest, Extractor};
use crate::text::mask::ascii_boundary;
use crate::text::script;

static PERSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").expect("valid regex"));

static ORG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*\s+(?:Inc|LLC|Corp|Corporation|Ltd|Limited|Company|Co|Group|Institute|University|College)\b",
    )
    .expect("valid regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4}|(?:19|20)\d{2})\b",
    )
    .expect("valid regex")
});

const ENGLISH_SEED: &[(&str, &str)] = &[
    ("Taiwan", "GPE"),
    ("Taipei", "GPE"),
    ("Hong Kong", "GPE"),
    ("China", "GPE"),
    ("Beijing", "GPE"),
    ("Japan", "GPE"),
    ("Tokyo", "GPE"),
    ("United States", "GPE"),
    ("USA", "GPE"),
    ("Texas", "GPE"),
    ("London", "GPE"),
    ("New York", "GPE"),
    ("Nvidia", "ORG"),
    ("Adidas", "ORG"),
    ("Gogoro", "ORG"),
    ("Netflix", "ORG"),
    ("YouTube", "PRODUCT"),
    ("Instagram", "PRODUCT"),
    ("Facebook", "PRODUCT"),
    ("Apple Watch", "PRODUCT"),
];

/// Compiled-in gazetteer used when no TSV lexicon is installed.
pub fn seed_lexicon() -> IndexMap<String, String> {
    lexicon::merge_entries(ENGLISH_SEED, None)
}

/// Pattern-plus-gazetteer English backend.
pub struct EnglishExtractor {
    lexicon: IndexMap<String, String>,
    max_seq_len: usize,
}

impl EnglishExtractor {
    pub fn new(lexicon: IndexMap<String, String>, max_seq_len: usize) -> Self {
        Self {
            lexicon,
            max_seq_len,
        }
    }

    fn scan_lexicon(&self, text: &str, out: &mut Vec<EntityCandidate>) {
        let chars: Vec<char> = text.chars().collect();
        for (term, label) in &self.lexicon {
            let needle: Vec<char> = term.chars().collect();
            if needle.is_empty() || needle.len() > chars.len() {
                continue;
            }
            let mut idx = 0usize;
            while idx + needle.len() <= chars.len() {
                let end = idx + needle.len();
                let hit = chars[idx..end]
                    .iter()
                    .zip(&needle)
                    .all(|(a, b)| a.eq_ignore_ascii_case(b))
                    && ascii_boundary(&chars, idx, end);
                if hit {
                    out.push(EntityCandidate {
                        span: Span { start: idx, end },
                        label: EntityLabel::new(label),
                        source: Source::En,
                        confidence: Some(0.9),
                        text: chars[idx..end].iter().collect(),
                    });
                    idx = end;
                } else {
                    idx += 1;
                }
            }
        }
    }
}

/// Build the English backend, layering `english.tsv` from the lexicon dir
/// (when present) over the seeds.
pub fn load_backend(settings: &Settings) -> Result<Arc<dyn Extractor>> {
    let path = settings.join_lexicon("english.tsv");
    let extra = if path.exists() {
        Some(lexicon::load_lexicon(&path)?)
    } else {
        None
    };
    let entries = lexicon::merge_entries(ENGLISH_SEED, extra);
    debug!(terms = entries.len(), "english lexicon ready");
    Ok(Arc::new(EnglishExtractor::new(
        entries,
        settings.max_seq_len,
    )))
}

impl Extractor for EnglishExtractor {
    fn source(&self) -> Source {
        Source::En
    }

    fn extract(&self, text: &str) -> Result<Vec<EntityCandidate>, ExtractionError> {
        let total = text.chars().count();
        if total > self.max_seq_len {
            return Err(ExtractionError::InputTooLong {
                lang: Source::En,
                chars: total,
                max: self.max_seq_len,
            });
        }
        if !script::has_latin_run(text) {
            return Ok(Vec::new());
        }

        // Confidence mirrors routing quality: hits inside an almost purely
        // English sentence score higher than hits in mixed-script ones.
        let sentences: Vec<(usize, usize, bool)> = script::split_sentences(text)
            .into_iter()
            .map(|(start, fragment)| {
                (
                    start,
                    start + fragment.chars().count(),
                    script::is_english_sentence(fragment),
                )
            })
            .collect();

        let mut candidates = Vec::new();
        self.scan_lexicon(text, &mut candidates);
        // Tag order matters at equal spans: ORG beats PERSON for
        // "Taipei Medical University" style matches.
        for (pattern, label) in [(&*ORG, "ORG"), (&*PERSON, "PERSON"), (&*DATE, "DATE")] {
            for m in pattern.find_iter(text) {
                let start = char_index(text, m.start());
                let end = start + m.as_str().chars().count();
                candidates.push(EntityCandidate {
                    span: Span { start, end },
                    label: EntityLabel::new(label),
                    source: Source::En,
                    confidence: Some(sentence_confidence(&sentences, start)),
                    text: m.as_str().to_string(),
                });
            }
        }
        Ok(retain_longest(candidates))
    }
}

fn sentence_confidence(sentences: &[(usize, usize, bool)], start: usize) -> f64 {
    for (s, e, english) in sentences {
        if start >= *s && start < *e {
            return if *english { 0.85 } else { 0.7 };
        }
    }
    0.7
}

fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}
