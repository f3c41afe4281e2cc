//! Database models

use serde::{Deserialize, Serialize};

/// Sentinel file name used when an upload does not name its document
pub const UNKNOWN_FILE_NAME: &str = "unknown.pdf";

/// Question type tag
///
/// Only multiple-choice questions are generated today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
}

impl QuestionType {
    /// Parse the wire/database representation (exact match)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "multiple-choice" => Some(QuestionType::MultipleChoice),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
        }
    }
}

/// Difficulty level tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// Parse the wire/database representation (exact match)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(DifficultyLevel::Easy),
            "medium" => Some(DifficultyLevel::Medium),
            "hard" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }
}

/// A question ready for insertion (no id yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    #[serde(rename = "fileName")]
    pub source_file_name: String,
    pub lecture_title: String,
    pub lecture_content: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub choices: Vec<String>,
    pub correct_answer: String,
    pub difficulty_level: DifficultyLevel,
    /// RFC 3339, set once at creation
    pub date_created: String,
}

/// A persisted question
///
/// Serialized with the column names clients already use (`fileName` for the
/// grouping key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: i64,
    #[serde(rename = "fileName")]
    pub source_file_name: String,
    pub lecture_title: String,
    pub lecture_content: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub choices: Vec<String>,
    pub correct_answer: String,
    pub difficulty_level: DifficultyLevel,
    pub date_created: String,
}

impl QuestionRecord {
    /// Attach a store-assigned id to a new question
    pub fn from_new(id: i64, question: NewQuestion) -> Self {
        Self {
            id,
            source_file_name: question.source_file_name,
            lecture_title: question.lecture_title,
            lecture_content: question.lecture_content,
            question_text: question.question_text,
            question_type: question.question_type,
            choices: question.choices,
            correct_answer: question.correct_answer,
            difficulty_level: question.difficulty_level,
            date_created: question.date_created,
        }
    }
}

/// Question count for one source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub file_name: String,
    pub question_count: i64,
}
