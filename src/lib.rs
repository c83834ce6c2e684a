//! Bilingual (Chinese/English) named-entity extraction pipeline.
//!
//! Raw text is normalized, optionally masked, then handed to two language
//! backends in parallel; their candidates are merged into one de-overlapped,
//! start-ordered annotation set over the shared normalized text.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod ner;
pub mod text;
