//! Script detection and sentence segmentation helpers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dominant writing system of a text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Cjk,
}

/// True for characters in the CJK family (unified ideographs, kana, hangul).
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // Extension A
        | '\u{F900}'..='\u{FAFF}'   // Compatibility Ideographs
        | '\u{3040}'..='\u{30FF}'   // Hiragana and Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
    )
}

/// True when CJK letters outnumber Latin letters in `text`.
///
/// Ties (including no letters at all) fall to the Latin side, which keeps the
/// English backend authoritative for script-neutral spans.
pub fn cjk_majority(text: &str) -> bool {
    let mut cjk = 0usize;
    let mut latin = 0usize;
    for c in text.chars() {
        if is_cjk(c) {
            cjk += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
    }
    cjk > latin
}

/// Classify the dominant script of a whole document.
pub fn dominant_script(text: &str) -> Script {
    if cjk_majority(text) {
        Script::Cjk
    } else {
        Script::Latin
    }
}

// Both Chinese and Latin sentence enders, plus comma-level pauses. Chinese
// social-media text often runs whole paragraphs on commas alone.
static SENTENCE_DELIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，,。：:；;！!.？?\n]").expect("valid regex"));

static ASCII_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9]{2,}").expect("valid regex"));

/// Split on the sentence delimiter class, yielding each fragment that has
/// visible content together with its starting character offset.
pub fn split_sentences(text: &str) -> Vec<(usize, &str)> {
    let mut fragments = Vec::new();
    let mut byte_pos = 0usize;
    let mut char_pos = 0usize;
    for m in SENTENCE_DELIM.find_iter(text) {
        let fragment = &text[byte_pos..m.start()];
        if !fragment.trim().is_empty() {
            fragments.push((char_pos, fragment));
        }
        char_pos += fragment.chars().count() + text[m.start()..m.end()].chars().count();
        byte_pos = m.end();
    }
    let tail = &text[byte_pos..];
    if !tail.trim().is_empty() {
        fragments.push((char_pos, tail));
    }
    fragments
}

/// Ratio test for routing: a sentence counts as English when ASCII word runs
/// (plus the single separators between them) cover more than 95% of its
/// characters.
pub fn is_english_sentence(sentence: &str) -> bool {
    let total = sentence.chars().count();
    if total == 0 {
        return false;
    }
    let mut covered = 0usize;
    let mut runs = 0usize;
    for m in ASCII_RUN.find_iter(sentence) {
        covered += m.as_str().len();
        runs += 1;
    }
    if runs == 0 {
        return false;
    }
    (covered + runs - 1) as f64 / total as f64 > 0.95
}

/// True when the sentence contains at least one multi-char ASCII run, i.e.
/// there is something for the English backend to look at.
pub fn has_latin_run(sentence: &str) -> bool {
    ASCII_RUN.is_match(sentence)
}
