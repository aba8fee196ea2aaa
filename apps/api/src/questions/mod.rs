//! Question understanding: classification into categories, normalization
//! into exact-match patterns, and keyword extraction for similarity search.

pub mod classifier;
pub mod text;

pub use classifier::categorize;
pub use text::{extract_keywords, normalize_question, pattern_words};
