//! Reconciliation between the two backends' label vocabularies.

/// Raw tag to canonical tag. Anything unlisted passes through untouched so
/// a new model label can never be silently misfiled.
const CANONICAL: &[(&str, &str)] = &[
    ("PER", "PERSON"),
    ("PERSON", "PERSON"),
    ("ORG", "ORG"),
    ("ORGANIZATION", "ORG"),
    ("GPE", "LOCATION"),
    ("LOC", "LOCATION"),
    ("LOCATION", "LOCATION"),
    ("FAC", "LOCATION"),
    ("DATE", "DATE"),
    ("TIME", "DATE"),
    ("PRODUCT", "PRODUCT"),
    ("NORP", "MISC"),
    ("EVENT", "MISC"),
    ("WORK_OF_ART", "MISC"),
];

/// Map a raw extractor tag onto the canonical vocabulary.
pub fn canonical(label: &str) -> &str {
    CANONICAL
        .iter()
        .find(|(raw, _)| raw.eq_ignore_ascii_case(label))
        .map(|(_, tag)| *tag)
        .unwrap_or(label)
}
