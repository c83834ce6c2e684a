//! Text cleaning ahead of extraction: URLs, markup, emoji, punctuation, stopwords.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::stopwords;

/// Target language for stopword selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

/// Switches for the individual cleaning passes. All passes are on by
/// default; [`NormalizeOptions::for_extraction`] is the profile the entity
/// pipeline uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub strip_urls: bool,
    pub strip_html: bool,
    pub strip_emoji: bool,
    pub strip_punctuation: bool,
    pub strip_stopwords: bool,
    pub language: Language,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_urls: true,
            strip_html: true,
            strip_emoji: true,
            strip_punctuation: true,
            strip_stopwords: true,
            language: Language::En,
        }
    }
}

impl NormalizeOptions {
    /// Cleaning profile used ahead of extraction. Sentence punctuation and
    /// stopwords stay, otherwise entity boundaries would not survive.
    pub fn for_extraction(language: Language) -> Self {
        Self {
            strip_punctuation: false,
            strip_stopwords: false,
            language,
            ..Self::default()
        }
    }
}

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://|www\.)[-A-Za-z0-9+/=:?#\[\]!$&'()*,;.%_~]*").expect("valid regex")
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        "\u{1F300}-\u{1F5FF}",
        "\u{1F600}-\u{1F64F}",
        "\u{1F680}-\u{1F6FF}",
        "\u{1F700}-\u{1F77F}",
        "\u{1F780}-\u{1F7FF}",
        "\u{1F800}-\u{1F8FF}",
        "\u{1F900}-\u{1F9FF}",
        "\u{1FA00}-\u{1FA6F}",
        "\u{1FA70}-\u{1FAFF}",
        "\u{2702}-\u{27B0}",
        "]+",
    ))
    .expect("valid regex")
});

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{P}\p{S}]").expect("valid regex"));

/// Clean `text` according to `options`.
///
/// Every removal writes a single space in place of the matched run, and
/// whitespace is collapsed per line afterwards. Removed material is never
/// spliced, so running the function twice gives the same output as running
/// it once, and line structure is preserved.
pub fn normalize(text: &str, options: &NormalizeOptions) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut cleaned = text.to_string();
    if options.strip_urls {
        cleaned = URL.replace_all(&cleaned, " ").into_owned();
    }
    if options.strip_html {
        cleaned = HTML_TAG.replace_all(&cleaned, " ").into_owned();
    }
    if options.strip_emoji {
        cleaned = EMOJI.replace_all(&cleaned, " ").into_owned();
    }
    if options.strip_punctuation {
        cleaned = PUNCT.replace_all(&cleaned, " ").into_owned();
    }
    cleaned
        .split('\n')
        .map(|line| {
            let line = if options.strip_stopwords {
                strip_stopword_tokens(line, options.language)
            } else {
                line.to_string()
            };
            line.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_stopword_tokens(line: &str, language: Language) -> String {
    match language {
        Language::En => line
            .split_whitespace()
            .filter(|token| !stopwords::is_english_stopword(token))
            .collect::<Vec<_>>()
            .join(" "),
        Language::Zh => {
            // No word boundaries; remove by substring, longest entry first,
            // leaving a space so neighbours never fuse into a new match.
            let mut cleaned = line.to_string();
            for term in stopwords::chinese_stopwords() {
                if cleaned.contains(term) {
                    cleaned = cleaned.replace(term, " ");
                }
            }
            cleaned
        }
    }
}
