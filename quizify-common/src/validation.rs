//! Shape validation of AI-generated question batches
//!
//! Model output is untrusted. Nothing reaches the store until the whole batch
//! has been parsed and every question has passed the checks below.
//!
//! Per-question failures are accumulated, not fail-fast: the returned
//! [`Error::InvalidQuestionShape`] lists every offending index and field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::models::{DifficultyLevel, NewQuestion, QuestionType};
use crate::error::QuestionIssue;
use crate::{Error, Result};

/// One shape-checked question from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    pub choices: Vec<String>,
    pub correct_answer: String,
    pub difficulty_level: DifficultyLevel,
}

/// Optional generation metadata the model may attach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadata {
    pub date_created: String,
}

/// A fully validated model response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBatch {
    pub lecture_title: String,
    pub lecture_content: String,
    pub questions: Vec<GeneratedQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BatchMetadata>,
}

impl GeneratedBatch {
    /// Turn the batch into insertable rows for one source document
    ///
    /// `date_created` is applied to every row; model-supplied metadata dates
    /// are not trusted for provenance.
    pub fn to_new_questions(&self, file_name: &str, date_created: &str) -> Vec<NewQuestion> {
        self.questions
            .iter()
            .map(|question| NewQuestion {
                source_file_name: file_name.to_string(),
                lecture_title: self.lecture_title.clone(),
                lecture_content: self.lecture_content.clone(),
                question_text: question.question_text.clone(),
                question_type: question.question_type,
                choices: question.choices.clone(),
                correct_answer: question.correct_answer.clone(),
                difficulty_level: question.difficulty_level,
                date_created: date_created.to_string(),
            })
            .collect()
    }
}

/// Parse raw model text and validate it
pub fn validate(raw: &str) -> Result<GeneratedBatch> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| Error::MalformedJson(e.to_string()))?;
    validate_value(value)
}

/// Validate an already-parsed JSON value
pub fn validate_value(value: Value) -> Result<GeneratedBatch> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::MalformedJson(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    let items = match object.get("questions") {
        Some(Value::Array(items)) => items,
        _ => return Err(Error::MissingQuestionsField),
    };

    let mut questions = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match check_question(item) {
            Ok(question) => questions.push(question),
            Err(reasons) => issues.extend(
                reasons
                    .into_iter()
                    .map(|reason| QuestionIssue { index, reason }),
            ),
        }
    }

    if !issues.is_empty() {
        return Err(Error::InvalidQuestionShape(issues));
    }

    let metadata = object
        .get("metadata")
        .and_then(|m| m.get("dateCreated"))
        .and_then(Value::as_str)
        .map(|date| BatchMetadata { date_created: date.to_string() });

    Ok(GeneratedBatch {
        lecture_title: optional_string(&object, "lectureTitle"),
        lecture_content: optional_string(&object, "lectureContent"),
        questions,
        metadata,
    })
}

fn optional_string(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check one element of `questions`, collecting every failing field
fn check_question(item: &Value) -> std::result::Result<GeneratedQuestion, Vec<String>> {
    let Some(object) = item.as_object() else {
        return Err(vec![format!("expected an object, got {}", json_kind(item))]);
    };

    let mut reasons = Vec::new();

    let string_field = |key: &str, reasons: &mut Vec<String>| -> Option<String> {
        match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                reasons.push(format!("{} must be a string, got {}", key, json_kind(other)));
                None
            }
            None => {
                reasons.push(format!("missing {}", key));
                None
            }
        }
    };

    let question_text = string_field("questionText", &mut reasons);
    let correct_answer = string_field("correctAnswer", &mut reasons);

    let question_type = string_field("questionType", &mut reasons).and_then(|raw| {
        let parsed = QuestionType::from_str(&raw);
        if parsed.is_none() {
            reasons.push(format!("questionType '{}' is not multiple-choice", raw));
        }
        parsed
    });

    let difficulty_level = string_field("difficultyLevel", &mut reasons).and_then(|raw| {
        let parsed = DifficultyLevel::from_str(&raw);
        if parsed.is_none() {
            reasons.push(format!("difficultyLevel '{}' is not one of easy|medium|hard", raw));
        }
        parsed
    });

    let choices = match object.get("choices") {
        Some(Value::Array(values)) if values.is_empty() => {
            reasons.push("choices must not be empty".to_string());
            None
        }
        Some(Value::Array(values)) => {
            let strings: Option<Vec<String>> = values
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect();
            if strings.is_none() {
                reasons.push("choices must contain only strings".to_string());
            }
            strings
        }
        Some(other) => {
            reasons.push(format!("choices must be an array, got {}", json_kind(other)));
            None
        }
        None => {
            reasons.push("missing choices".to_string());
            None
        }
    };

    match (question_text, question_type, choices, correct_answer, difficulty_level) {
        (
            Some(question_text),
            Some(question_type),
            Some(choices),
            Some(correct_answer),
            Some(difficulty_level),
        ) if reasons.is_empty() => Ok(GeneratedQuestion {
            question_text,
            question_type,
            choices,
            correct_answer,
            difficulty_level,
        }),
        _ => Err(reasons),
    }
}
