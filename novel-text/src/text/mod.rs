//! Line-level text processing: whitespace normalization, chapter tagging and tokenization.

pub mod chapters;
pub mod normalizer;
pub mod tokenizer;
