//! Persistence seams for the two learning engines.
//!
//! Each engine owns its record type and talks to storage only through these
//! traits, carried as `Arc<dyn …>` so tests can inject `InMemoryStore`.
//! Updates are read-modify-write; concurrent writers to one record race and
//! the last write wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::answer::{LearnedAnswer, QuestionCategory};
use crate::models::mapping::PlatformMapping;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn find_mapping(&self, platform: &str) -> Result<Option<PlatformMapping>, StoreError>;

    async fn save_mapping(&self, mapping: &PlatformMapping) -> Result<(), StoreError>;
}

#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn find_answer(&self, id: Uuid) -> Result<Option<LearnedAnswer>, StoreError>;

    async fn find_by_pattern(
        &self,
        user_email: &str,
        pattern: &str,
    ) -> Result<Option<LearnedAnswer>, StoreError>;

    async fn find_by_category(
        &self,
        user_email: &str,
        category: QuestionCategory,
    ) -> Result<Vec<LearnedAnswer>, StoreError>;

    /// All of a user's answers, most used first.
    async fn find_by_user(&self, user_email: &str) -> Result<Vec<LearnedAnswer>, StoreError>;

    async fn save_answer(&self, answer: &LearnedAnswer) -> Result<(), StoreError>;
}
