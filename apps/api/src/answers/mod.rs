pub mod engine;
pub mod handlers;

pub use engine::{AnswerLearningEngine, AnswerMatch};
