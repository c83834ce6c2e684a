//! Post-merge cleanup of implausible entity surface forms.

use tracing::debug;

use crate::ner::types::MergedEntity;
use crate::text::script::is_cjk;

/// Drop entities whose surface text fails the plausibility rules and tidy
/// the survivors' display text (trim, collapse embedded whitespace). Spans
/// are left untouched.
pub fn clean(entities: Vec<MergedEntity>, max_entity_len: usize) -> Vec<MergedEntity> {
    let before = entities.len();
    let mut kept = Vec::with_capacity(before);
    for mut entity in entities {
        if !should_keep(&entity.text, max_entity_len) {
            continue;
        }
        entity.text = tidy(&entity.text);
        kept.push(entity);
    }
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "filtered implausible entities");
    }
    kept
}

// Rules distilled from eyeballing noisy model output on social-media text:
// stray quote/dash prefixes, path-like fragments, short digit-and-hanzi
// blends, and anything longer than a plausible name.
fn should_keep(token: &str, max_entity_len: usize) -> bool {
    let token = token.trim();
    if token.is_empty() || token.starts_with('\'') || token.starts_with('-') {
        return false;
    }
    if token.contains(',') || token.contains('/') || token.contains('\\') {
        return false;
    }
    let chars = token.chars().count();
    if chars > max_entity_len {
        return false;
    }
    let has_cjk = token.chars().any(is_cjk);
    let has_alpha = token.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    if has_cjk && has_digit && chars < 5 {
        return false;
    }
    if token.contains(' ') && chars < 5 {
        return false;
    }
    if has_cjk && has_alpha && has_digit && token.contains(' ') && chars < 8 {
        return false;
    }
    true
}

fn tidy(token: &str) -> String {
    token.split_whitespace().collect::<Vec<_>>().join(" ")
}
