//! AnswerLearningEngine: per-user memory of free-text answers.
//!
//! Retrieval is two-tier: an exact lookup on the normalized question, then a
//! keyword-overlap search within the question's category. Confidence moves
//! with feedback and is always kept in [0.3, 1.0].

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::answer::{LearnedAnswer, NewAnswer, QuestionCategory};
use crate::questions::{categorize, extract_keywords, normalize_question, pattern_words};
use crate::store::{AnswerStore, StoreError};

/// An exact match must be trusted more than this to short-circuit.
const EXACT_MATCH_MIN_CONFIDENCE: f64 = 0.5;
/// Candidates at or below this confidence are ignored by the similarity search.
const SIMILAR_MATCH_MIN_CONFIDENCE: f64 = 0.4;
const MIN_SIMILARITY: f64 = 0.3;

/// The answer suggested for a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerMatch {
    pub id: Uuid,
    pub answer: String,
    pub confidence: f64,
    pub category: QuestionCategory,
}

impl From<&LearnedAnswer> for AnswerMatch {
    fn from(a: &LearnedAnswer) -> Self {
        Self {
            id: a.id,
            answer: a.answer.clone(),
            confidence: a.confidence,
            category: a.category,
        }
    }
}

#[derive(Clone)]
pub struct AnswerLearningEngine {
    store: Arc<dyn AnswerStore>,
}

impl AnswerLearningEngine {
    pub fn new(store: Arc<dyn AnswerStore>) -> Self {
        Self { store }
    }

    pub async fn find_best_answer(
        &self,
        user_email: &str,
        question: &str,
    ) -> Result<Option<AnswerMatch>, StoreError> {
        let pattern = normalize_question(question);
        let category = categorize(question);
        info!("Finding answer for pattern: '{pattern}', category: {category}");

        if let Some(exact) = self.store.find_by_pattern(user_email, &pattern).await? {
            if exact.confidence > EXACT_MATCH_MIN_CONFIDENCE {
                info!("Found exact match with confidence: {}", exact.confidence);
                return Ok(Some(AnswerMatch::from(&exact)));
            }
            debug!(
                "Exact match {} too weak ({}), trying similar questions",
                exact.id, exact.confidence
            );
        }

        let candidates = self.store.find_by_category(user_email, category).await?;
        let words = pattern_words(&pattern);

        let best = candidates
            .iter()
            .filter(|c| c.confidence > SIMILAR_MATCH_MIN_CONFIDENCE)
            .map(|c| (similarity(&words, &c.keywords), c))
            .max_by(|a, b| rank(*a, *b));

        match best {
            Some((score, answer)) if score > MIN_SIMILARITY => {
                info!("Found category match {} with similarity: {score:.3}", answer.id);
                Ok(Some(AnswerMatch::from(answer)))
            }
            _ => {
                info!("No suitable answer found");
                Ok(None)
            }
        }
    }

    /// Stores the user's answer, reinforcing it if the same question was answered before.
    pub async fn learn_answer(
        &self,
        user_email: &str,
        question: &str,
        answer: &str,
        platform: Option<&str>,
        job_title: Option<&str>,
    ) -> Result<LearnedAnswer, StoreError> {
        let pattern = normalize_question(question);

        let record = match self.store.find_by_pattern(user_email, &pattern).await? {
            Some(mut existing) => {
                existing.relearn(answer);
                info!(
                    "Re-learned answer {} ({}), confidence: {}",
                    existing.id, existing.category, existing.confidence
                );
                existing
            }
            None => {
                let category = categorize(question);
                info!("Learning answer for question category: {category}");
                LearnedAnswer::new(NewAnswer {
                    user_email,
                    original_question: question,
                    question_pattern: pattern,
                    answer,
                    category,
                    keywords: extract_keywords(question),
                    source_platform: platform,
                    job_title_context: job_title,
                })
            }
        };

        self.store.save_answer(&record).await?;
        Ok(record)
    }

    /// Unknown ids are ignored so feedback stays idempotent.
    pub async fn record_answer_used(&self, id: Uuid) -> Result<(), StoreError> {
        let Some(mut answer) = self.store.find_answer(id).await? else {
            debug!("Ignoring use of unknown answer {id}");
            return Ok(());
        };
        answer.mark_used();
        self.store.save_answer(&answer).await?;
        info!("Recorded answer use, new confidence: {}", answer.confidence);
        Ok(())
    }

    pub async fn record_answer_edited(&self, id: Uuid, new_answer: &str) -> Result<(), StoreError> {
        let Some(mut answer) = self.store.find_answer(id).await? else {
            debug!("Ignoring edit of unknown answer {id}");
            return Ok(());
        };
        answer.mark_edited(new_answer);
        self.store.save_answer(&answer).await?;
        info!("Updated answer, new confidence: {}", answer.confidence);
        Ok(())
    }

    /// Most used first.
    pub async fn get_user_answers(&self, user_email: &str) -> Result<Vec<LearnedAnswer>, StoreError> {
        self.store.find_by_user(user_email).await
    }

    pub async fn get_answers_by_category(
        &self,
        user_email: &str,
        category: QuestionCategory,
    ) -> Result<Vec<LearnedAnswer>, StoreError> {
        self.store.find_by_category(user_email, category).await
    }

    pub fn categorize_question(&self, question: &str) -> QuestionCategory {
        categorize(question)
    }
}

/// Question words found among the keywords, over the larger of the two counts.
fn similarity(words: &[&str], keywords: &[String]) -> f64 {
    if words.is_empty() || keywords.is_empty() {
        return 0.0;
    }
    let matches = words
        .iter()
        .filter(|w| keywords.iter().any(|k| k == *w))
        .count();
    matches as f64 / words.len().max(keywords.len()) as f64
}

/// Similarity, then confidence, then most recently used, then smallest id.
fn rank(a: (f64, &LearnedAnswer), b: (f64, &LearnedAnswer)) -> Ordering {
    let (score_a, a) = a;
    let (score_b, b) = b;
    score_a
        .total_cmp(&score_b)
        .then(a.confidence.total_cmp(&b.confidence))
        .then(a.last_used_at.cmp(&b.last_used_at))
        .then(b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::matching::ANSWER_CONFIDENCE_FLOOR;
    use crate::models::answer::INITIAL_ANSWER_CONFIDENCE;
    use crate::store::InMemoryStore;

    const USER: &str = "jane@example.com";

    fn engine() -> (AnswerLearningEngine, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (AnswerLearningEngine::new(store.clone()), store)
    }

    fn stored(pattern: &str, keywords: &[&str], confidence: f64) -> LearnedAnswer {
        let mut a = LearnedAnswer::new(NewAnswer {
            user_email: USER,
            original_question: pattern,
            question_pattern: pattern.to_string(),
            answer: pattern,
            category: QuestionCategory::Challenge,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            source_platform: None,
            job_title_context: None,
        });
        a.confidence = confidence;
        a
    }

    #[tokio::test]
    async fn test_learned_answer_is_found_by_exact_question() {
        let (engine, _) = engine();
        engine
            .learn_answer(
                USER,
                "Why do you want to work here?",
                "I love building products",
                Some("greenhouse"),
                Some("SWE"),
            )
            .await
            .unwrap();

        let found = engine
            .find_best_answer(USER, "Why do you want to work here?")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.answer, "I love building products");
        assert_eq!(found.category, QuestionCategory::Motivation);
        assert_eq!(found.confidence, INITIAL_ANSWER_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_new_record_carries_context_and_keywords() {
        let (engine, _) = engine();
        let learned = engine
            .learn_answer(
                USER,
                "Tell me about a challenge you overcame at work",
                "Migrated a monolith",
                Some("lever"),
                Some("Backend Engineer"),
            )
            .await
            .unwrap();

        assert_eq!(learned.question_pattern, "tell me about a challenge you overcame at work");
        assert_eq!(learned.keywords, vec!["challenge", "overcame", "work"]);
        assert_eq!(learned.category, QuestionCategory::Challenge);
        assert_eq!(learned.use_count, 0);
        assert_eq!(learned.source_platform.as_deref(), Some("lever"));
        assert_eq!(learned.job_title_context.as_deref(), Some("Backend Engineer"));
    }

    #[tokio::test]
    async fn test_relearning_same_pattern_updates_in_place() {
        let (engine, store) = engine();
        let first = engine
            .learn_answer(USER, "Why this company?", "Mission.", None, None)
            .await
            .unwrap();
        let second = engine
            .learn_answer(USER, "  why THIS company ", "Mission and people.", None, None)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.answer, "Mission and people.");
        assert_eq!(second.use_count, 1);
        assert_eq!(second.confidence, 0.7);
        assert_eq!(store.find_by_user(USER).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_weak_exact_match_is_not_returned() {
        let (engine, _) = engine();
        let learned = engine
            .learn_answer(USER, "Why do you want to work here?", "Money.", None, None)
            .await
            .unwrap();
        engine.record_answer_edited(learned.id, "Growth.").await.unwrap();
        engine.record_answer_edited(learned.id, "Impact.").await.unwrap();

        // Confidence is now exactly 0.5 and the question overlaps its own
        // keywords by only 2 of 7 words.
        let found = engine
            .find_best_answer(USER, "Why do you want to work here?")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_similar_question_in_same_category_is_found() {
        let (engine, _) = engine();
        let learned = engine
            .learn_answer(
                USER,
                "Tell me about a challenge you overcame at work",
                "Migrated a monolith",
                None,
                None,
            )
            .await
            .unwrap();

        let found = engine
            .find_best_answer(USER, "What challenge have you overcame recently")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, learned.id);
        assert_eq!(found.category, QuestionCategory::Challenge);
    }

    #[tokio::test]
    async fn test_same_category_without_overlap_returns_nothing() {
        let (engine, _) = engine();
        engine
            .learn_answer(
                USER,
                "Tell me about a challenge you overcame at work",
                "Migrated a monolith",
                None,
                None,
            )
            .await
            .unwrap();

        let question = "Describe a difficult situation you faced";
        assert_eq!(engine.categorize_question(question), QuestionCategory::Challenge);
        assert!(engine.find_best_answer(USER, question).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_low_confidence_candidates_are_skipped() {
        let (engine, _) = engine();
        let learned = engine
            .learn_answer(
                USER,
                "Tell me about a challenge you overcame at work",
                "Migrated a monolith",
                None,
                None,
            )
            .await
            .unwrap();
        for _ in 0..5 {
            engine.record_answer_edited(learned.id, "v2").await.unwrap();
        }

        let found = engine
            .find_best_answer(USER, "What challenge have you overcame recently")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_ties_prefer_confidence_then_recency() {
        let (engine, store) = engine();
        let keywords = ["challenge", "overcame", "work"];

        let modest = stored("challenge one", &keywords, 0.7);
        let trusted = stored("challenge two", &keywords, 0.9);
        store.save_answer(&modest).await.unwrap();
        store.save_answer(&trusted).await.unwrap();

        let question = "What challenge have you overcame recently";
        let found = engine.find_best_answer(USER, question).await.unwrap().unwrap();
        assert_eq!(found.id, trusted.id);

        let mut recent = stored("challenge three", &keywords, 0.9);
        recent.last_used_at = Utc::now() + Duration::minutes(5);
        store.save_answer(&recent).await.unwrap();

        let found = engine.find_best_answer(USER, question).await.unwrap().unwrap();
        assert_eq!(found.id, recent.id);
    }

    #[tokio::test]
    async fn test_answers_are_private_to_their_user() {
        let (engine, _) = engine();
        engine
            .learn_answer(USER, "Why this role?", "Fit.", None, None)
            .await
            .unwrap();
        let other = engine
            .find_best_answer("john@example.com", "Why this role?")
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_confidence_stays_within_bounds() {
        let (engine, store) = engine();
        let learned = engine
            .learn_answer(USER, "What are your salary expectations?", "120k", None, None)
            .await
            .unwrap();

        for _ in 0..20 {
            engine.record_answer_used(learned.id).await.unwrap();
        }
        let a = store.find_answer(learned.id).await.unwrap().unwrap();
        assert_eq!(a.confidence, 1.0);
        assert_eq!(a.use_count, 20);

        for i in 0..30 {
            engine
                .record_answer_edited(learned.id, &format!("{i}k"))
                .await
                .unwrap();
        }
        let a = store.find_answer(learned.id).await.unwrap().unwrap();
        assert_eq!(a.confidence, ANSWER_CONFIDENCE_FLOOR);
        assert_eq!(a.answer, "29k");
    }

    #[tokio::test]
    async fn test_feedback_for_unknown_id_is_a_no_op() {
        let (engine, store) = engine();
        engine.record_answer_used(Uuid::new_v4()).await.unwrap();
        engine
            .record_answer_edited(Uuid::new_v4(), "anything")
            .await
            .unwrap();
        assert!(store.find_by_user(USER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_answers_are_ordered_by_use() {
        let (engine, _) = engine();
        let rare = engine
            .learn_answer(USER, "When can you start?", "Two weeks", None, None)
            .await
            .unwrap();
        let common = engine
            .learn_answer(USER, "Are you willing to relocate?", "Yes", None, None)
            .await
            .unwrap();
        engine.record_answer_used(common.id).await.unwrap();
        engine.record_answer_used(common.id).await.unwrap();

        let all = engine.get_user_answers(USER).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![common.id, rare.id]);

        let relocation = engine
            .get_answers_by_category(USER, QuestionCategory::Relocation)
            .await
            .unwrap();
        assert_eq!(relocation.len(), 1);
        assert_eq!(relocation[0].id, common.id);
    }

    #[test]
    fn test_similarity_uses_larger_side_as_denominator() {
        let keywords = vec!["challenge".to_string(), "overcame".to_string(), "work".to_string()];
        let words = ["what", "challenge", "have", "you", "overcame", "recently"];
        assert!((similarity(&words, &keywords) - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(similarity(&[], &keywords), 0.0);
        assert_eq!(similarity(&words, &[]), 0.0);
    }
}
