//! Named-entity extraction and merge orchestration.

pub mod chinese;
pub mod english;
pub mod filter;
pub mod labels;
pub mod lexicon;
pub mod merge;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{ExtractionError, PipelineError};
use crate::ner::types::{EntityCandidate, MergedEntity, Source};

/// One language's extraction backend. Implementations must report char
/// offsets into the exact string they were handed; the merger depends on
/// both backends seeing the same text.
pub trait Extractor: Send + Sync {
    fn source(&self) -> Source;
    fn extract(&self, text: &str) -> Result<Vec<EntityCandidate>, ExtractionError>;
}

/// Both extraction backends plus the run parameters they share.
pub struct Pipeline {
    english: Arc<dyn Extractor>,
    chinese: Arc<dyn Extractor>,
    max_entity_len: usize,
    extract_timeout: Duration,
}

impl Pipeline {
    /// Assemble a pipeline around two backends.
    pub fn new(
        english: Arc<dyn Extractor>,
        chinese: Arc<dyn Extractor>,
        settings: &Settings,
    ) -> Self {
        Self {
            english,
            chinese,
            max_entity_len: settings.max_entity_len,
            extract_timeout: Duration::from_secs(settings.extract_timeout_secs),
        }
    }

    /// Load the built-in backends: seed gazetteers merged with any TSV
    /// lexicons found in the configured lexicon directory.
    pub async fn load(settings: &Settings) -> Result<Self> {
        let english = english::load_backend(settings)?;
        let chinese = chinese::load_backend(settings)?;
        info!("extraction backends ready");
        Ok(Self::new(english, chinese, settings))
    }

    /// Run both backends on `text` in parallel, merge their candidates, and
    /// filter implausible surface forms.
    ///
    /// `text` must already be normalized. A failure on either side fails the
    /// whole document; a one-sided result would silently misrepresent
    /// coverage for that language.
    pub async fn annotate(&self, text: &str) -> Result<Vec<MergedEntity>, PipelineError> {
        let (en, zh) = tokio::try_join!(
            run_backend(self.english.clone(), text.to_string(), self.extract_timeout),
            run_backend(self.chinese.clone(), text.to_string(), self.extract_timeout),
        )?;
        debug!(en = en.len(), zh = zh.len(), "backends returned candidates");
        let merged = merge::merge(text, en, zh)?;
        Ok(filter::clean(merged, self.max_entity_len))
    }
}

async fn run_backend(
    backend: Arc<dyn Extractor>,
    text: String,
    limit: Duration,
) -> Result<Vec<EntityCandidate>, PipelineError> {
    let lang = backend.source();
    let handle = tokio::task::spawn_blocking(move || backend.extract(&text));
    let joined = timeout(limit, handle)
        .await
        .map_err(|_| ExtractionError::Timeout {
            lang,
            seconds: limit.as_secs(),
        })?;
    let result = joined.map_err(|err| ExtractionError::Unavailable {
        lang,
        reason: err.to_string(),
    })?;
    result.map_err(PipelineError::from)
}

/// Keep the longest candidate at each position: sort by start (longer span
/// first on ties, insertion order after that), then drop whatever overlaps
/// an already kept candidate.
pub(crate) fn retain_longest(mut candidates: Vec<EntityCandidate>) -> Vec<EntityCandidate> {
    candidates.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });
    let mut kept: Vec<EntityCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let clear = kept
            .last()
            .map_or(true, |prev| candidate.span.start >= prev.span.end);
        if clear {
            kept.push(candidate);
        }
    }
    kept
}
