use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::answer::{LearnedAnswer, QuestionCategory};
use crate::models::mapping::{FieldRule, PlatformMapping};
use crate::store::{AnswerStore, MappingStore, StoreError};

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlatformMappingRow {
    platform: String,
    url_pattern: String,
    field_rules: Json<Vec<FieldRule>>,
    success_count: i32,
    correction_count: i32,
    confidence_score: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlatformMappingRow> for PlatformMapping {
    fn from(row: PlatformMappingRow) -> Self {
        PlatformMapping {
            platform: row.platform,
            url_pattern: row.url_pattern,
            field_rules: row.field_rules.0,
            success_count: row.success_count.max(0) as u32,
            correction_count: row.correction_count.max(0) as u32,
            confidence_score: row.confidence_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct LearnedAnswerRow {
    id: Uuid,
    user_email: String,
    question_pattern: String,
    original_question: String,
    answer: String,
    category: String,
    keywords: Vec<String>,
    use_count: i32,
    confidence: f64,
    source_platform: Option<String>,
    job_title_context: Option<String>,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

impl TryFrom<LearnedAnswerRow> for LearnedAnswer {
    type Error = StoreError;

    fn try_from(row: LearnedAnswerRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<QuestionCategory>()
            .map_err(|reason| StoreError::Corrupt {
                key: row.id.to_string(),
                reason,
            })?;

        Ok(LearnedAnswer {
            id: row.id,
            user_email: row.user_email,
            question_pattern: row.question_pattern,
            original_question: row.original_question,
            answer: row.answer,
            category,
            keywords: row.keywords,
            use_count: row.use_count.max(0) as u32,
            confidence: row.confidence,
            source_platform: row.source_platform,
            job_title_context: row.job_title_context,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
        })
    }
}

fn to_answers(rows: Vec<LearnedAnswerRow>) -> Result<Vec<LearnedAnswer>, StoreError> {
    rows.into_iter().map(LearnedAnswer::try_from).collect()
}

fn count_to_db(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Keyed on the natural key so two first-time learns of one question
/// collapse into a single row; the first row's id is kept.
const UPSERT_ANSWER_SQL: &str = r#"
    INSERT INTO learned_answers
        (id, user_email, question_pattern, original_question, answer, category,
         keywords, use_count, confidence, source_platform, job_title_context,
         created_at, last_used_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
    ON CONFLICT (user_email, question_pattern) DO UPDATE SET
        answer = EXCLUDED.answer,
        keywords = EXCLUDED.keywords,
        use_count = EXCLUDED.use_count,
        confidence = EXCLUDED.confidence,
        last_used_at = EXCLUDED.last_used_at
"#;

#[async_trait]
impl MappingStore for PgStore {
    async fn find_mapping(&self, platform: &str) -> Result<Option<PlatformMapping>, StoreError> {
        let row: Option<PlatformMappingRow> =
            sqlx::query_as("SELECT * FROM platform_mappings WHERE platform = $1")
                .bind(platform)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(PlatformMapping::from))
    }

    async fn save_mapping(&self, mapping: &PlatformMapping) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO platform_mappings
                (platform, url_pattern, field_rules, success_count, correction_count,
                 confidence_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (platform) DO UPDATE SET
                url_pattern = EXCLUDED.url_pattern,
                field_rules = EXCLUDED.field_rules,
                success_count = EXCLUDED.success_count,
                correction_count = EXCLUDED.correction_count,
                confidence_score = EXCLUDED.confidence_score,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&mapping.platform)
        .bind(&mapping.url_pattern)
        .bind(Json(&mapping.field_rules))
        .bind(count_to_db(mapping.success_count))
        .bind(count_to_db(mapping.correction_count))
        .bind(mapping.confidence_score)
        .bind(mapping.created_at)
        .bind(mapping.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AnswerStore for PgStore {
    async fn find_answer(&self, id: Uuid) -> Result<Option<LearnedAnswer>, StoreError> {
        let row: Option<LearnedAnswerRow> =
            sqlx::query_as("SELECT * FROM learned_answers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(LearnedAnswer::try_from).transpose()
    }

    async fn find_by_pattern(
        &self,
        user_email: &str,
        pattern: &str,
    ) -> Result<Option<LearnedAnswer>, StoreError> {
        let row: Option<LearnedAnswerRow> = sqlx::query_as(
            "SELECT * FROM learned_answers WHERE user_email = $1 AND question_pattern = $2",
        )
        .bind(user_email)
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await?;
        row.map(LearnedAnswer::try_from).transpose()
    }

    async fn find_by_category(
        &self,
        user_email: &str,
        category: QuestionCategory,
    ) -> Result<Vec<LearnedAnswer>, StoreError> {
        let rows: Vec<LearnedAnswerRow> =
            sqlx::query_as("SELECT * FROM learned_answers WHERE user_email = $1 AND category = $2")
                .bind(user_email)
                .bind(category.as_str())
                .fetch_all(&self.pool)
                .await?;
        to_answers(rows)
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<LearnedAnswer>, StoreError> {
        let rows: Vec<LearnedAnswerRow> = sqlx::query_as(
            "SELECT * FROM learned_answers WHERE user_email = $1 ORDER BY use_count DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;
        to_answers(rows)
    }

    async fn save_answer(&self, answer: &LearnedAnswer) -> Result<(), StoreError> {
        sqlx::query(UPSERT_ANSWER_SQL)
            .bind(answer.id)
            .bind(&answer.user_email)
            .bind(&answer.question_pattern)
            .bind(&answer.original_question)
            .bind(&answer.answer)
            .bind(answer.category.as_str())
            .bind(&answer.keywords)
            .bind(count_to_db(answer.use_count))
            .bind(answer.confidence)
            .bind(&answer.source_platform)
            .bind(&answer.job_title_context)
            .bind(answer.created_at)
            .bind(answer.last_used_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
