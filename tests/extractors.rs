use bilingual_ner::error::ExtractionError;
use bilingual_ner::ner::chinese::{self, ChineseExtractor};
use bilingual_ner::ner::english::{self, EnglishExtractor};
use bilingual_ner::ner::types::Source;
use bilingual_ner::ner::Extractor;

fn english() -> EnglishExtractor {
    EnglishExtractor::new(english::seed_lexicon(), 4096)
}

fn chinese() -> ChineseExtractor {
    ChineseExtractor::new(chinese::seed_lexicon(), 4096)
}

#[test]
fn english_finds_capitalized_person() {
    let candidates = english().extract("I met Patty Chang yesterday.").unwrap();
    let person = candidates
        .iter()
        .find(|c| c.label.as_str() == "PERSON")
        .expect("person candidate");
    assert_eq!(person.text, "Patty Chang");
    assert_eq!(person.source, Source::En);
}

#[test]
fn english_finds_org_suffix_and_year() {
    let candidates = english()
        .extract("Acme Corp shipped units in 2024.")
        .unwrap();
    let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
    assert!(labels.contains(&"ORG"));
    assert!(labels.contains(&"DATE"));
}

#[test]
fn english_gazetteer_beats_person_pattern() {
    let candidates = english().extract("flights to New York today").unwrap();
    let hit = candidates
        .iter()
        .find(|c| c.text == "New York")
        .expect("gazetteer candidate");
    assert_eq!(hit.label.as_str(), "GPE");
}

#[test]
fn english_skips_pure_cjk_text() {
    let candidates = english().extract("柯文哲在台北開會。").unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn english_output_is_sorted_and_disjoint() {
    let candidates = english()
        .extract("Jane Doe joined Acme Corp in Taipei in 2023.")
        .unwrap();
    for pair in candidates.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
}

#[test]
fn english_rejects_oversized_input() {
    let extractor = EnglishExtractor::new(english::seed_lexicon(), 10);
    let err = extractor.extract("this is well over ten characters").unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::InputTooLong {
            lang: Source::En,
            ..
        }
    ));
}

#[test]
fn chinese_finds_lexicon_entities() {
    let candidates = chinese().extract("柯文哲昨天在台北。").unwrap();
    let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    assert!(texts.contains(&"柯文哲"));
    assert!(texts.contains(&"台北"));
    assert!(candidates.iter().all(|c| c.source == Source::Zh));
}

#[test]
fn chinese_finds_full_dates() {
    let candidates = chinese().extract("活動在2024年4月15日舉行").unwrap();
    let date = candidates
        .iter()
        .find(|c| c.label.as_str() == "DATE")
        .expect("date candidate");
    assert_eq!(date.text, "2024年4月15日");
}

#[test]
fn chinese_surname_heuristic_guesses_names() {
    let candidates = chinese().extract("今天 王小明 來上課").unwrap();
    let person = candidates
        .iter()
        .find(|c| c.label.as_str() == "PER")
        .expect("surname guess");
    assert_eq!(person.text, "王小明");
    assert!(person.confidence.unwrap() < 0.9);
}

#[test]
fn chinese_never_emits_pure_ascii() {
    let candidates = chinese().extract("Nvidia 4070 is great").unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn chinese_rejects_oversized_input() {
    let extractor = ChineseExtractor::new(chinese::seed_lexicon(), 5);
    let err = extractor.extract("這一段文字明顯超過五個字").unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::InputTooLong {
            lang: Source::Zh,
            ..
        }
    ));
}

#[test]
fn chinese_surname_guess_yields_to_lexicon_hits() {
    let candidates = chinese().extract("王柯文哲說了").unwrap();
    let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    assert!(texts.contains(&"柯文哲"));
    assert!(!texts.contains(&"王柯文"));
}
