use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bilingual_ner::config::Settings;
use bilingual_ner::error::{ExtractionError, PipelineError};
use bilingual_ner::ner::types::{EntityCandidate, MergedEntity, Source};
use bilingual_ner::ner::{chinese, english, labels, Extractor, Pipeline};

fn settings_for(dir: &Path) -> Settings {
    Settings {
        lexicon_dir: dir.to_path_buf(),
        max_seq_len: 4096,
        mask_char: '_',
        max_entity_len: 35,
        extract_timeout_secs: 10,
        lexicon_base_url: "http://localhost".to_string(),
    }
}

fn find<'a>(entities: &'a [MergedEntity], needle: &str) -> &'a MergedEntity {
    entities
        .iter()
        .find(|e| e.text == needle)
        .unwrap_or_else(|| panic!("missing entity {needle}"))
}

#[tokio::test]
async fn annotate_handles_mixed_script_text() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    let pipeline = Pipeline::load(&settings).await.unwrap();

    let text = "My name is Patty Chang. 我是柯文哲. Nvidia在台北.";
    let entities = pipeline.annotate(text).await.unwrap();

    assert_eq!(find(&entities, "Patty Chang").label.as_str(), "PERSON");
    assert!(find(&entities, "Patty Chang").sources.contains(&Source::En));
    assert_eq!(find(&entities, "柯文哲").label.as_str(), "PER");
    assert!(find(&entities, "柯文哲").sources.contains(&Source::Zh));
    assert_eq!(find(&entities, "Nvidia").label.as_str(), "ORG");
    assert_eq!(find(&entities, "台北").label.as_str(), "LOC");

    for pair in entities.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
}

#[tokio::test]
async fn annotate_picks_up_tsv_lexicons() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("chinese.tsv"), "鬍鬚張\tORG\n").unwrap();
    let settings = settings_for(dir.path());
    let pipeline = Pipeline::load(&settings).await.unwrap();

    let entities = pipeline.annotate("中午去鬍鬚張吃飯").await.unwrap();
    let hit = entities
        .iter()
        .find(|e| e.text == "鬍鬚張")
        .expect("lexicon entity");
    assert_eq!(hit.label.as_str(), "ORG");
}

struct FailingBackend;

impl Extractor for FailingBackend {
    fn source(&self) -> Source {
        Source::En
    }

    fn extract(&self, _text: &str) -> Result<Vec<EntityCandidate>, ExtractionError> {
        Err(ExtractionError::Unavailable {
            lang: Source::En,
            reason: "model not installed".to_string(),
        })
    }
}

#[tokio::test]
async fn backend_failure_fails_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    let chinese = chinese::load_backend(&settings).unwrap();
    let pipeline = Pipeline::new(Arc::new(FailingBackend), chinese, &settings);

    let err = pipeline.annotate("柯文哲 and friends").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::Unavailable {
            lang: Source::En,
            ..
        })
    ));
}

struct HangingBackend;

impl Extractor for HangingBackend {
    fn source(&self) -> Source {
        Source::En
    }

    fn extract(&self, _text: &str) -> Result<Vec<EntityCandidate>, ExtractionError> {
        std::thread::sleep(Duration::from_secs(2));
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn stalled_backend_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(dir.path());
    settings.extract_timeout_secs = 1;
    let chinese = chinese::load_backend(&settings).unwrap();
    let pipeline = Pipeline::new(Arc::new(HangingBackend), chinese, &settings);

    let err = pipeline.annotate("slow going today").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::Timeout {
            lang: Source::En,
            seconds: 1,
        })
    ));
}

#[tokio::test]
async fn oversized_document_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(dir.path());
    settings.max_seq_len = 10;
    let pipeline = Pipeline::load(&settings).await.unwrap();

    let err = pipeline
        .annotate("this text is clearly longer than ten characters")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::InputTooLong { .. })
    ));
}

#[tokio::test]
async fn filter_drops_implausible_surface_forms() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("english.tsv"), "a/b\tORG\n").unwrap();
    let settings = settings_for(dir.path());
    let pipeline = Pipeline::load(&settings).await.unwrap();

    // The slash entry matches but the post-merge filter rejects path-like
    // surface forms.
    let entities = pipeline.annotate("report a/b here").await.unwrap();
    assert!(entities.iter().all(|e| e.text != "a/b"));
}

#[test]
fn labels_reconcile_to_canonical_tags() {
    assert_eq!(labels::canonical("PER"), "PERSON");
    assert_eq!(labels::canonical("GPE"), "LOCATION");
    assert_eq!(labels::canonical("Loc"), "LOCATION");
    assert_eq!(labels::canonical("ORGANIZATION"), "ORG");
    assert_eq!(labels::canonical("WIDGET"), "WIDGET");
}

#[test]
fn backends_report_their_language() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    assert_eq!(english::load_backend(&settings).unwrap().source(), Source::En);
    assert_eq!(chinese::load_backend(&settings).unwrap().source(), Source::Zh);
}
