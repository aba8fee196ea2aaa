use crate::matching::PhraseTable;
use crate::models::answer::QuestionCategory;

/// Evaluated top to bottom; the first category with any phrase hit wins.
const CATEGORY_PHRASES: PhraseTable<QuestionCategory> = PhraseTable::new(&[
    (
        QuestionCategory::Motivation,
        &[
            "why do you want",
            "why are you interested",
            "why this company",
            "why this role",
            "why should we hire",
            "what attracts you",
        ],
    ),
    (
        QuestionCategory::Experience,
        &[
            "tell us about your experience",
            "describe your experience",
            "what experience do you have",
            "years of experience",
        ],
    ),
    (
        QuestionCategory::Challenge,
        &[
            "challenge",
            "difficult situation",
            "problem you solved",
            "obstacle",
            "conflict",
            "disagreement",
        ],
    ),
    (
        QuestionCategory::StrengthWeakness,
        &[
            "strength",
            "weakness",
            "greatest asset",
            "area of improvement",
            "what makes you unique",
        ],
    ),
    (
        QuestionCategory::Salary,
        &["salary", "compensation", "pay", "rate", "expectations"],
    ),
    (
        QuestionCategory::Availability,
        &[
            "when can you start",
            "availability",
            "notice period",
            "start date",
            "available to begin",
        ],
    ),
    (
        QuestionCategory::Relocation,
        &["relocation", "relocate", "willing to move", "work location"],
    ),
    (
        QuestionCategory::CoverLetter,
        &[
            "cover letter",
            "personal statement",
            "introduce yourself",
            "tell us about yourself",
            "about you",
        ],
    ),
    (
        QuestionCategory::Technical,
        &[
            "technical",
            "programming",
            "code",
            "algorithm",
            "system design",
            "technology",
            "framework",
            "language",
        ],
    ),
    (
        QuestionCategory::Behavioral,
        &[
            "tell me about a time",
            "give an example",
            "describe a situation",
            "how did you handle",
            "walk me through",
        ],
    ),
]);

/// Classifies a question by case-insensitive phrase matching. Never fails;
/// anything unrecognised (including the empty string) is `Other`.
pub fn categorize(question: &str) -> QuestionCategory {
    CATEGORY_PHRASES
        .first_match(&question.to_lowercase())
        .unwrap_or(QuestionCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motivation() {
        assert_eq!(
            categorize("Why do you want to work here?"),
            QuestionCategory::Motivation
        );
        assert_eq!(
            categorize("WHAT ATTRACTS YOU to this role?"),
            QuestionCategory::Motivation
        );
    }

    #[test]
    fn test_challenge_variants() {
        assert_eq!(
            categorize("Tell me about a challenge you overcame"),
            QuestionCategory::Challenge
        );
        assert_eq!(
            categorize("Describe a difficult situation you faced"),
            QuestionCategory::Challenge
        );
    }

    #[test]
    fn test_order_decides_overlapping_phrases() {
        // "challenge" (CHALLENGE) precedes "tell me about a time" (BEHAVIORAL).
        assert_eq!(
            categorize("Tell me about a time you faced a challenge"),
            QuestionCategory::Challenge
        );
        // "years of experience" (EXPERIENCE) precedes "salary" (SALARY).
        assert_eq!(
            categorize("Years of experience and salary range"),
            QuestionCategory::Experience
        );
    }

    #[test]
    fn test_each_remaining_category() {
        assert_eq!(categorize("What is your greatest weakness?"), QuestionCategory::StrengthWeakness);
        assert_eq!(categorize("Desired salary"), QuestionCategory::Salary);
        assert_eq!(categorize("What is your notice period?"), QuestionCategory::Availability);
        assert_eq!(categorize("Are you willing to relocate?"), QuestionCategory::Relocation);
        assert_eq!(categorize("Cover Letter"), QuestionCategory::CoverLetter);
        assert_eq!(categorize("Which programming languages do you use?"), QuestionCategory::Technical);
        assert_eq!(categorize("Give an example of leadership"), QuestionCategory::Behavioral);
    }

    #[test]
    fn test_unmatched_and_empty_are_other() {
        assert_eq!(categorize(""), QuestionCategory::Other);
        assert_eq!(categorize("Hi"), QuestionCategory::Other);
        assert_eq!(categorize("Favourite colour?"), QuestionCategory::Other);
    }
}
