//! Text preparation layer: cleaning, masking, and script detection.

pub mod mask;
pub mod normalize;
pub mod script;
pub mod stopwords;
