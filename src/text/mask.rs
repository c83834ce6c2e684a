//! Masking of sensitive word spans ahead of extraction.

use crate::error::InvalidSpanError;
use crate::ner::types::Span;

/// Replace every character covered by `spans` with `mask_char`.
///
/// `spans` must be ascending and pairwise disjoint (run [`coalesce`] first if
/// they might not be); anything else is an ambiguous request and errors. The
/// output always has exactly the same character count as the input.
pub fn mask(text: &str, spans: &[Span], mask_char: char) -> Result<String, InvalidSpanError> {
    let total = text.chars().count();
    let mut prev_end = 0usize;
    for span in spans {
        span.check_bounds(total)?;
        if span.start < prev_end {
            return Err(InvalidSpanError::Overlapping {
                start: span.start,
                end: span.end,
                prev_end,
            });
        }
        prev_end = span.end;
    }

    let mut masked = String::with_capacity(text.len());
    let mut remaining = spans.iter().peekable();
    for (idx, c) in text.chars().enumerate() {
        while remaining.peek().is_some_and(|span| idx >= span.end) {
            remaining.next();
        }
        let covered = remaining
            .peek()
            .is_some_and(|span| idx >= span.start && idx < span.end);
        masked.push(if covered { mask_char } else { c });
    }
    Ok(masked)
}

/// Locate every occurrence of each term as a char-offset span. Matching is
/// exact for CJK and ASCII case-insensitive for Latin; term edges that are
/// ASCII alphanumeric must fall on a word boundary so `UK` never fires
/// inside `Ukraine`.
pub fn find_term_spans(text: &str, terms: &[String]) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    for term in terms {
        let needle: Vec<char> = term.trim().chars().collect();
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
                spans.push(Span { start: idx, end });
                idx = end;
            } else {
                idx += 1;
            }
        }
    }
    spans.sort_by_key(|span| (span.start, span.end));
    spans
}

/// Merge overlapping or touching spans into a minimal ascending set.
pub fn coalesce(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                if span.end > last.end {
                    last.end = span.end;
                }
            }
            _ => merged.push(span),
        }
    }
    merged
}

pub(crate) fn ascii_boundary(chars: &[char], start: usize, end: usize) -> bool {
    let lead_ok = start == 0
        || !(chars[start].is_ascii_alphanumeric() && chars[start - 1].is_ascii_alphanumeric());
    let tail_ok = end == chars.len()
        || !(chars[end - 1].is_ascii_alphanumeric() && chars[end].is_ascii_alphanumeric());
    lead_ok && tail_ok
}
