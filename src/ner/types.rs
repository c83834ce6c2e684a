//! Core data model: spans, candidates, and merged entities.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidSpanError;

/// Half-open character-offset interval `[start, end)` into the text a
/// candidate was extracted from. Offsets count `char`s, not bytes, so the
/// same span is valid for Chinese and English text alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Build a span, rejecting empty or inverted intervals.
    pub fn new(start: usize, end: usize) -> Result<Self, InvalidSpanError> {
        if start >= end {
            return Err(InvalidSpanError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Validate the span against a text of `text_chars` characters.
    pub fn check_bounds(&self, text_chars: usize) -> Result<(), InvalidSpanError> {
        if self.start >= self.end {
            return Err(InvalidSpanError::Empty {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > text_chars {
            return Err(InvalidSpanError::OutOfBounds {
                start: self.start,
                end: self.end,
                len: text_chars,
            });
        }
        Ok(())
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when the two intervals share at least one character.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The substring of `text` this span covers.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        let mut byte_start = text.len();
        let mut byte_end = text.len();
        for (idx, (byte, _)) in text.char_indices().enumerate() {
            if idx == self.start {
                byte_start = byte;
            }
            if idx == self.end {
                byte_end = byte;
                break;
            }
        }
        &text[byte_start..byte_end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Which language backend produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    En,
    Zh,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::En => write!(f, "EN"),
            Source::Zh => write!(f, "ZH"),
        }
    }
}

/// Opaque entity tag. The two backends use different vocabularies (`PERSON`
/// vs `PER` and so on), so this is deliberately not a closed enum; see
/// [`crate::ner::labels`] for the reconciliation table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityLabel(String);

impl EntityLabel {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityLabel {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

/// One extractor hit. Immutable once emitted; the merger never mutates
/// candidates, it folds them into fresh [`MergedEntity`] values.
#[derive(Debug, Clone, Serialize)]
pub struct EntityCandidate {
    pub span: Span,
    pub label: EntityLabel,
    pub source: Source,
    pub confidence: Option<f64>,
    pub text: String,
}

/// De-overlapped output unit of the merger. `label` is the primary tag;
/// tags that lost a conflict during merging are kept in `secondary_labels`.
#[derive(Debug, Clone, Serialize)]
pub struct MergedEntity {
    pub span: Span,
    pub label: EntityLabel,
    pub secondary_labels: Vec<EntityLabel>,
    pub sources: BTreeSet<Source>,
    pub text: String,
}
