use proptest::prelude::*;

use bilingual_ner::error::InvalidSpanError;
use bilingual_ner::ner::merge::merge;
use bilingual_ner::ner::types::{EntityCandidate, EntityLabel, Source, Span};

fn candidate(text: &str, start: usize, end: usize, label: &str, source: Source) -> EntityCandidate {
    let span = Span::new(start, end).expect("valid span");
    EntityCandidate {
        span,
        label: EntityLabel::new(label),
        source,
        confidence: Some(0.8),
        text: span.slice(text).to_string(),
    }
}

#[test]
fn identical_spans_merge_into_one() {
    let text = "meet Patty Chang soon";
    let en = vec![candidate(text, 5, 16, "PERSON", Source::En)];
    let zh = vec![candidate(text, 5, 16, "PER", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].span, Span::new(5, 16).unwrap());
    assert_eq!(merged[0].sources.len(), 2);
    // Latin-dominant span, so the English tag wins and the Chinese one
    // drops to secondary.
    assert_eq!(merged[0].label.as_str(), "PERSON");
    assert_eq!(merged[0].secondary_labels, vec![EntityLabel::new("PER")]);
}

#[test]
fn overlapping_spans_extend_to_union() {
    let text = "abcdefghij";
    let en = vec![candidate(text, 0, 5, "ORG", Source::En)];
    let zh = vec![candidate(text, 3, 8, "ORG", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].span, Span::new(0, 8).unwrap());
    assert_eq!(merged[0].text, "abcdefgh");
}

#[test]
fn adjacent_spans_stay_separate() {
    let text = "abcdefghij";
    let en = vec![candidate(text, 0, 5, "ORG", Source::En)];
    let zh = vec![candidate(text, 5, 8, "LOC", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].span.end, 5);
    assert_eq!(merged[1].span.start, 5);
}

#[test]
fn gapped_spans_stay_separate() {
    let text = "abcdefghij";
    let en = vec![candidate(text, 0, 5, "ORG", Source::En)];
    let zh = vec![candidate(text, 6, 10, "LOC", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].span, Span::new(0, 5).unwrap());
    assert_eq!(merged[1].span, Span::new(6, 10).unwrap());
}

#[test]
fn one_sided_input_passes_through() {
    let text = "柯文哲去台北";
    let zh = vec![
        candidate(text, 0, 3, "PER", Source::Zh),
        candidate(text, 4, 6, "LOC", Source::Zh),
    ];
    let merged = merge(text, Vec::new(), zh).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].text, "柯文哲");
    assert!(merged[0].sources.contains(&Source::Zh));
    assert!(merged[0].secondary_labels.is_empty());

    let en = vec![candidate(text, 0, 3, "PERSON", Source::En)];
    let merged = merge(text, en, Vec::new()).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].label.as_str(), "PERSON");
    assert!(merged[0].sources.contains(&Source::En));
}

#[test]
fn cjk_majority_span_prefers_chinese_label() {
    let text = "柯文哲參選總統";
    let en = vec![candidate(text, 0, 3, "PERSON", Source::En)];
    let zh = vec![candidate(text, 0, 3, "PER", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].label.as_str(), "PER");
    assert_eq!(merged[0].secondary_labels, vec![EntityLabel::new("PERSON")]);
}

#[test]
fn longer_span_anchors_ties() {
    let text = "abcdefghij";
    let en = vec![candidate(text, 0, 3, "DATE", Source::En)];
    let zh = vec![candidate(text, 0, 6, "LOC", Source::Zh)];
    let merged = merge(text, en, zh).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].span, Span::new(0, 6).unwrap());
    // Latin text: the English label takes over even though the Chinese
    // candidate anchored the group.
    assert_eq!(merged[0].label.as_str(), "DATE");
    assert_eq!(merged[0].secondary_labels, vec![EntityLabel::new("LOC")]);
}

#[test]
fn empty_span_is_rejected() {
    let text = "abcdefghij";
    let bad = EntityCandidate {
        span: Span { start: 3, end: 3 },
        label: EntityLabel::new("ORG"),
        source: Source::En,
        confidence: None,
        text: String::new(),
    };
    let err = merge(text, vec![bad], Vec::new()).unwrap_err();
    assert!(matches!(err, InvalidSpanError::Empty { start: 3, end: 3 }));
}

#[test]
fn out_of_bounds_span_is_rejected() {
    let text = "short";
    let bad = candidate("a long enough text", 2, 12, "ORG", Source::En);
    let err = merge(text, vec![bad], Vec::new()).unwrap_err();
    assert!(matches!(err, InvalidSpanError::OutOfBounds { len: 5, .. }));
}

proptest! {
    #[test]
    fn merged_output_is_sorted_and_disjoint(
        raw in proptest::collection::vec(
            (0usize..39, 1usize..8, 0usize..3, any::<bool>()),
            0..12,
        )
    ) {
        let text = "abcdefghijklmnopqrstuvwxyzabcdefghijklmn";
        let mut en = Vec::new();
        let mut zh = Vec::new();
        for (start, len, label_idx, is_en) in raw {
            let end = (start + len).min(40);
            let label = ["PERSON", "ORG", "LOC"][label_idx];
            if is_en {
                en.push(candidate(text, start, end, label, Source::En));
            } else {
                zh.push(candidate(text, start, end, label, Source::Zh));
            }
        }
        let merged = merge(text, en, zh).unwrap();
        for pair in merged.windows(2) {
            prop_assert!(pair[0].span.start <= pair[1].span.start);
            prop_assert!(pair[0].span.end <= pair[1].span.start);
            prop_assert!(!pair[0].span.overlaps(&pair[1].span));
        }
        for entity in &merged {
            prop_assert!(!entity.span.is_empty());
            prop_assert_eq!(entity.text.chars().count(), entity.span.len());
            prop_assert!(!entity.sources.is_empty());
            prop_assert!(!entity.secondary_labels.contains(&entity.label));
        }
    }
}
