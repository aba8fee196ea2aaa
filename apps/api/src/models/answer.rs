use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::{clamp_confidence, ANSWER_CONFIDENCE_FLOOR};

/// Confidence of an answer the user has just typed in themselves.
pub const INITIAL_ANSWER_CONFIDENCE: f64 = 0.6;
const RELEARN_BOOST: f64 = 0.1;
const USED_BOOST: f64 = 0.05;
const EDITED_PENALTY: f64 = 0.05;

/// The kinds of essay-style questions application forms ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    Motivation,
    Experience,
    Challenge,
    StrengthWeakness,
    Salary,
    Availability,
    Relocation,
    CoverLetter,
    Technical,
    Behavioral,
    Other,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 11] = [
        QuestionCategory::Motivation,
        QuestionCategory::Experience,
        QuestionCategory::Challenge,
        QuestionCategory::StrengthWeakness,
        QuestionCategory::Salary,
        QuestionCategory::Availability,
        QuestionCategory::Relocation,
        QuestionCategory::CoverLetter,
        QuestionCategory::Technical,
        QuestionCategory::Behavioral,
        QuestionCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Motivation => "MOTIVATION",
            QuestionCategory::Experience => "EXPERIENCE",
            QuestionCategory::Challenge => "CHALLENGE",
            QuestionCategory::StrengthWeakness => "STRENGTH_WEAKNESS",
            QuestionCategory::Salary => "SALARY",
            QuestionCategory::Availability => "AVAILABILITY",
            QuestionCategory::Relocation => "RELOCATION",
            QuestionCategory::CoverLetter => "COVER_LETTER",
            QuestionCategory::Technical => "TECHNICAL",
            QuestionCategory::Behavioral => "BEHAVIORAL",
            QuestionCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionCategory::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown question category '{s}'"))
    }
}

/// A user's previously written answer to an essay-style question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedAnswer {
    pub id: Uuid,
    pub user_email: String,
    pub question_pattern: String,
    pub original_question: String,
    pub answer: String,
    pub category: QuestionCategory,
    pub keywords: Vec<String>,
    pub use_count: u32,
    pub confidence: f64,
    pub source_platform: Option<String>,
    pub job_title_context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// Inputs for a brand-new learned answer.
pub struct NewAnswer<'a> {
    pub user_email: &'a str,
    pub original_question: &'a str,
    pub question_pattern: String,
    pub answer: &'a str,
    pub category: QuestionCategory,
    pub keywords: Vec<String>,
    pub source_platform: Option<&'a str>,
    pub job_title_context: Option<&'a str>,
}

impl LearnedAnswer {
    pub fn new(params: NewAnswer<'_>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_email: params.user_email.to_string(),
            question_pattern: params.question_pattern,
            original_question: params.original_question.to_string(),
            answer: params.answer.to_string(),
            category: params.category,
            keywords: params.keywords,
            use_count: 0,
            confidence: INITIAL_ANSWER_CONFIDENCE,
            source_platform: params.source_platform.map(str::to_string),
            job_title_context: params.job_title_context.map(str::to_string),
            created_at: now,
            last_used_at: now,
        }
    }

    /// The user answered the same question again.
    pub fn relearn(&mut self, answer: &str) {
        self.answer = answer.to_string();
        self.use_count = self.use_count.saturating_add(1);
        self.adjust_confidence(RELEARN_BOOST);
    }

    /// A suggestion was accepted as-is.
    pub fn mark_used(&mut self) {
        self.use_count = self.use_count.saturating_add(1);
        self.adjust_confidence(USED_BOOST);
    }

    /// A suggestion was edited before use; the edit replaces the stored text.
    pub fn mark_edited(&mut self, new_answer: &str) {
        self.answer = new_answer.to_string();
        self.adjust_confidence(-EDITED_PENALTY);
    }

    fn adjust_confidence(&mut self, delta: f64) {
        self.confidence = clamp_confidence(self.confidence + delta, ANSWER_CONFIDENCE_FLOOR, 1.0);
        self.last_used_at = Utc::now();
    }
}
