//! Error taxonomy shared by the pipeline stages.

use thiserror::Error;

use crate::ner::types::Source;

/// Local span precondition violation. Not recoverable; processing of the
/// offending document stops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSpanError {
    #[error("span [{start}, {end}) is empty or inverted")]
    Empty { start: usize, end: usize },
    #[error("span [{start}, {end}) is out of bounds for text of {len} chars")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("span [{start}, {end}) overlaps a preceding span ending at {prev_end}")]
    Overlapping {
        start: usize,
        end: usize,
        prev_end: usize,
    },
}

/// Failure of one language's extraction backend. Surfaced unchanged and never
/// downgraded to an empty candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("{lang} extractor unavailable: {reason}")]
    Unavailable { lang: Source, reason: String },
    #[error("input of {chars} chars exceeds the {lang} extractor limit of {max}")]
    InputTooLong {
        lang: Source,
        chars: usize,
        max: usize,
    },
    #[error("{lang} extractor exceeded its {seconds}s budget")]
    Timeout { lang: Source, seconds: u64 },
}

/// Umbrella error for one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidSpan(#[from] InvalidSpanError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
