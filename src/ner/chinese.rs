//! Chinese entity extraction: gazetteer lexicon, date patterns, and a
//! surname heuristic for unlisted person names.

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

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}年(?:\d{1,2}月(?:\d{1,2}日)?)?|\d{1,2}月\d{1,2}日|\d{4}/\d{1,2}/\d{1,2}")
        .expect("valid regex")
});

const CHINESE_SEED: &[(&str, &str)] = &[
    ("柯文哲", "PER"),
    ("趙小蘭", "PER"),
    ("陶晶瑩", "PER"),
    ("賈永婕", "PER"),
    ("藍心湄", "PER"),
    ("于美人", "PER"),
    ("林柏宏", "PER"),
    ("婁峻碩", "PER"),
    ("胡小禎", "PER"),
    ("李佩甄", "PER"),
    ("隋棠", "PER"),
    ("布什", "PER"),
    ("民進黨", "ORG"),
    ("國民黨", "ORG"),
    ("參議院", "ORG"),
    ("勞工部", "ORG"),
    ("總統府", "ORG"),
    ("台積電", "ORG"),
    ("中研院", "ORG"),
    ("台灣", "LOC"),
    ("臺灣", "LOC"),
    ("台北", "LOC"),
    ("台中", "LOC"),
    ("高雄", "LOC"),
    ("中國", "LOC"),
    ("美國", "LOC"),
    ("日本", "LOC"),
    ("香港", "LOC"),
    ("德州", "LOC"),
    ("土城看守所", "LOC"),
];

// Common Taiwanese and mainland surnames; first char of a CJK run only, so
// mid-sentence characters do not spray person guesses everywhere.
const SURNAMES: &str = "王李張劉陳楊黃趙吳周徐孫馬朱胡郭何林高羅鄭梁謝宋唐許韓馮鄧曹彭曾蕭蔡潘田董袁于余葉杜蘇魏呂丁沈姚盧姜崔鍾譚陸汪范金石廖賈夏韋方白鄒孟熊秦邱江尹薛段雷侯龍陶黎賀顧毛郝龔邵萬錢嚴武戴莫孔向湯柯隋藍婁焦";

/// Compiled-in gazetteer used when no TSV lexicon is installed.
pub fn seed_lexicon() -> IndexMap<String, String> {
    lexicon::merge_entries(CHINESE_SEED, None)
}

/// Gazetteer-plus-heuristics Chinese backend.
pub struct ChineseExtractor {
    lexicon: IndexMap<String, String>,
    max_seq_len: usize,
}

impl ChineseExtractor {
    pub fn new(lexicon: IndexMap<String, String>, max_seq_len: usize) -> Self {
        Self {
            lexicon,
            max_seq_len,
        }
    }

    fn scan_lexicon(&self, chars: &[char], out: &mut Vec<EntityCandidate>) {
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
                    && ascii_boundary(chars, idx, end);
                if hit {
                    out.push(EntityCandidate {
                        span: Span { start: idx, end },
                        label: EntityLabel::new(label),
                        source: Source::Zh,
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

    fn surname_guesses(&self, chars: &[char], out: &mut Vec<EntityCandidate>) {
        let known: Vec<Span> = out.iter().map(|c| c.span).collect();
        for (run_start, run_end) in cjk_runs(chars) {
            let len = run_end - run_start;
            if len < 2 || !SURNAMES.contains(chars[run_start]) {
                continue;
            }
            let span = Span {
                start: run_start,
                end: run_start + 3.min(len),
            };
            // A guess yields to any overlapping lexicon or date hit.
            if known.iter().any(|hit| hit.overlaps(&span)) {
                continue;
            }
            out.push(EntityCandidate {
                span,
                label: EntityLabel::new("PER"),
                source: Source::Zh,
                confidence: Some(0.5),
                text: chars[span.start..span.end].iter().collect(),
            });
        }
    }
}

/// Build the Chinese backend, layering `chinese.tsv` from the lexicon dir
/// (when present) over the seeds.
pub fn load_backend(settings: &Settings) -> Result<Arc<dyn Extractor>> {
    let path = settings.join_lexicon("chinese.tsv");
    let extra = if path.exists() {
        Some(lexicon::load_lexicon(&path)?)
    } else {
        None
    };
    let entries = lexicon::merge_entries(CHINESE_SEED, extra);
    debug!(terms = entries.len(), "chinese lexicon ready");
    Ok(Arc::new(ChineseExtractor::new(
        entries,
        settings.max_seq_len,
    )))
}

impl Extractor for ChineseExtractor {
    fn source(&self) -> Source {
        Source::Zh
    }

    fn extract(&self, text: &str) -> Result<Vec<EntityCandidate>, ExtractionError> {
        let total = text.chars().count();
        if total > self.max_seq_len {
            return Err(ExtractionError::InputTooLong {
                lang: Source::Zh,
                chars: total,
                max: self.max_seq_len,
            });
        }

        let chars: Vec<char> = text.chars().collect();
        let mut candidates = Vec::new();
        self.scan_lexicon(&chars, &mut candidates);
        for m in DATE.find_iter(text) {
            let start = char_index(text, m.start());
            let end = start + m.as_str().chars().count();
            candidates.push(EntityCandidate {
                span: Span { start, end },
                label: EntityLabel::new("DATE"),
                source: Source::Zh,
                confidence: Some(0.85),
                text: m.as_str().to_string(),
            });
        }
        self.surname_guesses(&chars, &mut candidates);

        // Purely ASCII-alphanumeric tokens belong to the English side; the
        // Chinese backend never reports them, even from a user lexicon.
        candidates.retain(|c| !ascii_alnum_only(&c.text));
        Ok(retain_longest(candidates))
    }
}

fn cjk_runs(chars: &[char]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (idx, c) in chars.iter().enumerate() {
        if script::is_cjk(*c) {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(s) = start.take() {
            runs.push((s, idx));
        }
    }
    if let Some(s) = start {
        runs.push((s, chars.len()));
    }
    runs
}

fn ascii_alnum_only(text: &str) -> bool {
    let stripped: String = text.chars().filter(|c| *c != ' ').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_alphanumeric())
}

fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}
