//! Overlap sweep folding both backends' candidates into one annotation set.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::InvalidSpanError;
use crate::ner::types::{EntityCandidate, EntityLabel, MergedEntity, Source, Span};
use crate::text::script;

/// Merge the English and Chinese candidate lists into one de-overlapped,
/// start-ordered annotation set over `text`.
///
/// Candidates are validated up front, sorted by start (longer span first on
/// ties, so the more specific match anchors its group), then folded into an
/// open entity for as long as they keep overlapping it. When labels disagree
/// inside a group, the backend matching the dominant script of the merged
/// span keeps the primary label and the loser is retained as a secondary.
pub fn merge(
    text: &str,
    en: Vec<EntityCandidate>,
    zh: Vec<EntityCandidate>,
) -> Result<Vec<MergedEntity>, InvalidSpanError> {
    let total = text.chars().count();
    let mut candidates: Vec<EntityCandidate> = Vec::with_capacity(en.len() + zh.len());
    candidates.extend(en);
    candidates.extend(zh);
    for candidate in &candidates {
        candidate.span.check_bounds(total)?;
    }
    candidates.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });

    let mut merged = Vec::new();
    let mut open: Option<OpenEntity> = None;
    for candidate in candidates {
        match open {
            Some(ref mut current) if candidate.span.start < current.span.end => {
                current.absorb(candidate, text);
            }
            _ => {
                if let Some(prev) = open.take() {
                    merged.push(prev.close(text));
                }
                open = Some(OpenEntity::start(candidate));
            }
        }
    }
    if let Some(last) = open {
        merged.push(last.close(text));
    }
    trace!(entities = merged.len(), "merge sweep done");
    Ok(merged)
}

/// Accumulator for one overlap group during the sweep.
struct OpenEntity {
    span: Span,
    label: EntityLabel,
    label_source: Source,
    secondary: Vec<EntityLabel>,
    sources: BTreeSet<Source>,
}

impl OpenEntity {
    fn start(candidate: EntityCandidate) -> Self {
        let mut sources = BTreeSet::new();
        sources.insert(candidate.source);
        Self {
            span: candidate.span,
            label: candidate.label,
            label_source: candidate.source,
            secondary: Vec::new(),
            sources,
        }
    }

    fn absorb(&mut self, candidate: EntityCandidate, text: &str) {
        if candidate.span.end > self.span.end {
            self.span.end = candidate.span.end;
        }
        self.sources.insert(candidate.source);
        if candidate.label == self.label {
            return;
        }
        // Label authority follows the script actually covered by the merged
        // span: mostly-CJK spans trust the Chinese backend, everything else
        // trusts the English one.
        let authority = if script::cjk_majority(self.span.slice(text)) {
            Source::Zh
        } else {
            Source::En
        };
        if candidate.source == authority && self.label_source != authority {
            let demoted = std::mem::replace(&mut self.label, candidate.label);
            self.label_source = candidate.source;
            if !self.secondary.contains(&demoted) {
                self.secondary.push(demoted);
            }
        } else if !self.secondary.contains(&candidate.label) {
            self.secondary.push(candidate.label);
        }
    }

    fn close(self, text: &str) -> MergedEntity {
        let OpenEntity {
            span,
            label,
            secondary,
            sources,
            ..
        } = self;
        // A swap can leave the promoted label sitting in the secondaries.
        let secondary_labels = secondary.into_iter().filter(|tag| *tag != label).collect();
        MergedEntity {
            text: span.slice(text).to_string(),
            span,
            label,
            secondary_labels,
            sources,
        }
    }
}
