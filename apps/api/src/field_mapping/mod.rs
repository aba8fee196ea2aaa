pub mod ai;
pub mod engine;
pub mod handlers;
pub mod heuristics;
pub mod platform;
pub mod prompts;

pub use engine::FieldMappingEngine;
