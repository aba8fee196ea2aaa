use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::answer::{LearnedAnswer, QuestionCategory};
use crate::models::mapping::PlatformMapping;
use crate::store::{AnswerStore, MappingStore, StoreError};

/// Process-local store. Backs the test suite and runs the service when no
/// database is configured; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    mappings: RwLock<HashMap<String, PlatformMapping>>,
    answers: RwLock<HashMap<Uuid, LearnedAnswer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingStore for InMemoryStore {
    async fn find_mapping(&self, platform: &str) -> Result<Option<PlatformMapping>, StoreError> {
        Ok(self.mappings.read().await.get(platform).cloned())
    }

    async fn save_mapping(&self, mapping: &PlatformMapping) -> Result<(), StoreError> {
        self.mappings
            .write()
            .await
            .insert(mapping.platform.clone(), mapping.clone());
        Ok(())
    }
}

#[async_trait]
impl AnswerStore for InMemoryStore {
    async fn find_answer(&self, id: Uuid) -> Result<Option<LearnedAnswer>, StoreError> {
        Ok(self.answers.read().await.get(&id).cloned())
    }

    async fn find_by_pattern(
        &self,
        user_email: &str,
        pattern: &str,
    ) -> Result<Option<LearnedAnswer>, StoreError> {
        Ok(self
            .answers
            .read()
            .await
            .values()
            .find(|a| a.user_email == user_email && a.question_pattern == pattern)
            .cloned())
    }

    async fn find_by_category(
        &self,
        user_email: &str,
        category: QuestionCategory,
    ) -> Result<Vec<LearnedAnswer>, StoreError> {
        Ok(self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.user_email == user_email && a.category == category)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<LearnedAnswer>, StoreError> {
        let mut answers: Vec<LearnedAnswer> = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.user_email == user_email)
            .cloned()
            .collect();
        answers.sort_by(|a, b| b.use_count.cmp(&a.use_count));
        Ok(answers)
    }

    async fn save_answer(&self, answer: &LearnedAnswer) -> Result<(), StoreError> {
        self.answers.write().await.insert(answer.id, answer.clone());
        Ok(())
    }
}
