//! Answer normalization and quiz grading
//!
//! Comparison is case-insensitive and ignores surrounding whitespace. A
//! multi-select submission counts as correct when ANY selected choice equals
//! the canonical answer; exact-set matching is not applied.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::db::models::QuestionRecord;

/// A submitted answer value as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
    /// Anything else (numbers, objects, mixed arrays); never correct
    Other(Value),
}

/// One entry of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: i64,
    #[serde(default)]
    pub answer: Option<Answer>,
}

/// Per-question grading outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question_id: i64,
    pub question_text: String,
    pub user_answer: Option<Answer>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Result of grading one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub results: Vec<GradedAnswer>,
    pub score: usize,
    pub total_questions: usize,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compare a submitted answer against the canonical answer
///
/// Absent or blank submissions are never correct, even when the canonical
/// answer is itself blank.
pub fn is_correct(submitted: Option<&Answer>, canonical: &str) -> bool {
    let canonical = normalize(canonical);

    match submitted {
        Some(Answer::Single(answer)) => {
            let answer = normalize(answer);
            !answer.is_empty() && answer == canonical
        }
        Some(Answer::Multiple(answers)) => answers.iter().any(|answer| {
            let answer = normalize(answer);
            !answer.is_empty() && answer == canonical
        }),
        Some(Answer::Other(_)) | None => false,
    }
}

/// Grade a submission against the full question set
///
/// Only questions referenced by at least one answer are graded. Answers for
/// unknown ids are ignored. When several answers reference the same question,
/// the first one wins.
pub fn grade(submitted: &[SubmittedAnswer], questions: &[QuestionRecord]) -> GradingResult {
    let results: Vec<GradedAnswer> = questions
        .iter()
        .filter_map(|question| {
            let answer = submitted.iter().find(|a| a.question_id == question.id)?;
            let user_answer = answer.answer.clone();
            Some(GradedAnswer {
                question_id: question.id,
                question_text: question.question_text.clone(),
                is_correct: is_correct(user_answer.as_ref(), &question.correct_answer),
                user_answer,
                correct_answer: question.correct_answer.clone(),
            })
        })
        .collect();

    let unknown = submitted
        .iter()
        .filter(|a| !questions.iter().any(|q| q.id == a.question_id))
        .count();
    if unknown > 0 {
        debug!(unknown, "Ignoring answers for unknown question ids");
    }

    let score = results.iter().filter(|r| r.is_correct).count();
    let total_questions = results.len();

    GradingResult {
        results,
        score,
        total_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{DifficultyLevel, QuestionType};
    use serde_json::json;

    fn single(s: &str) -> Answer {
        Answer::Single(s.to_string())
    }

    fn multiple(values: &[&str]) -> Answer {
        Answer::Multiple(values.iter().map(|s| s.to_string()).collect())
    }

    fn question(id: i64, correct: &str) -> QuestionRecord {
        QuestionRecord {
            id,
            source_file_name: "a.pdf".to_string(),
            lecture_title: "t".to_string(),
            lecture_content: "c".to_string(),
            question_text: format!("question {}", id),
            question_type: QuestionType::MultipleChoice,
            choices: vec![correct.to_string(), "other".to_string()],
            correct_answer: correct.to_string(),
            difficulty_level: DifficultyLevel::Easy,
            date_created: "2024-03-01T10:00:00.000Z".to_string(),
        }
    }

    fn answer(question_id: i64, answer: Option<Answer>) -> SubmittedAnswer {
        SubmittedAnswer { question_id, answer }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(is_correct(Some(&single("  Paris ")), "paris"));
        assert!(is_correct(Some(&single("PARIS")), "  Paris\t"));
        assert!(!is_correct(Some(&single("Pariss")), "Paris"));
    }

    #[test]
    fn test_multi_select_any_match() {
        assert!(is_correct(Some(&multiple(&["paris", "rome"])), "Paris"));
        assert!(!is_correct(Some(&multiple(&["london", "rome"])), "Paris"));
        assert!(!is_correct(Some(&multiple(&[])), "Paris"));
    }

    #[test]
    fn test_absent_or_blank_is_false() {
        assert!(!is_correct(None, "Paris"));
        assert!(!is_correct(Some(&single("")), "Paris"));
        assert!(!is_correct(Some(&single("   ")), ""));
        assert!(!is_correct(Some(&Answer::Other(json!(42))), "42"));
    }

    #[test]
    fn test_blank_canonical_never_matches() {
        // A question stored with a blank answer cannot be answered correctly
        assert!(!is_correct(Some(&single("  ")), "   "));
        assert!(!is_correct(Some(&multiple(&["  ", "x"])), ""));
        assert!(!is_correct(Some(&multiple(&[""])), " "));
    }

    #[test]
    fn test_answer_wire_forms() {
        let parsed: Vec<SubmittedAnswer> = serde_json::from_value(json!([
            { "questionId": 1, "answer": "Paris" },
            { "questionId": 2, "answer": ["a", "b"] },
            { "questionId": 3, "answer": null },
            { "questionId": 4 },
            { "questionId": 5, "answer": 7 }
        ]))
        .unwrap();

        assert_eq!(parsed[0].answer, Some(single("Paris")));
        assert_eq!(parsed[1].answer, Some(multiple(&["a", "b"])));
        assert_eq!(parsed[2].answer, None);
        assert_eq!(parsed[3].answer, None);
        assert_eq!(parsed[4].answer, Some(Answer::Other(json!(7))));
    }

    #[test]
    fn test_grade_only_referenced_questions() {
        let questions = vec![question(1, "paris"), question(2, "rome")];
        let result = grade(&[answer(1, Some(single("Paris")))], &questions);

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].question_id, 1);
        assert!(result.results[0].is_correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 1);
    }

    #[test]
    fn test_grade_unknown_ids_ignored() {
        let questions = vec![question(1, "paris")];
        let result = grade(
            &[answer(99, Some(single("x"))), answer(1, Some(single("lyon")))],
            &questions,
        );

        assert_eq!(result.total_questions, 1);
        assert_eq!(result.score, 0);
        assert!(!result.results[0].is_correct);
    }

    #[test]
    fn test_grade_first_answer_wins() {
        let questions = vec![question(1, "paris")];
        let result = grade(
            &[answer(1, Some(single("rome"))), answer(1, Some(single("paris")))],
            &questions,
        );

        assert_eq!(result.results[0].user_answer, Some(single("rome")));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_grade_missing_answer_value() {
        let questions = vec![question(1, "paris"), question(2, "rome")];
        let result = grade(
            &[answer(2, None), answer(1, Some(multiple(&["x", "PARIS"])))],
            &questions,
        );

        // Results follow question order, not submission order
        assert_eq!(result.results[0].question_id, 1);
        assert!(result.results[0].is_correct);
        assert_eq!(result.results[1].user_answer, None);
        assert!(!result.results[1].is_correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 2);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["results"][1]["userAnswer"].is_null());
        assert_eq!(json["totalQuestions"], 2);
    }
}
