//! Common error types for Quizify

use thiserror::Error;

/// Common result type for Quizify operations
pub type Result<T> = std::result::Result<T, Error>;

/// One rejected question in a generated batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionIssue {
    /// Position of the question in the `questions` array
    pub index: usize,
    pub reason: String,
}

impl std::fmt::Display for QuestionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "question {}: {}", self.index, self.reason)
    }
}

/// Error types shared by the store, the validator and the server
#[derive(Error, Debug)]
pub enum Error {
    /// AI output could not be parsed as a JSON object
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// AI output has no `questions` array
    #[error("Response is missing the 'questions' array")]
    MissingQuestionsField,

    /// One or more generated questions failed the shape check
    #[error("Invalid question shape: {}", format_issues(.0))]
    InvalidQuestionShape(Vec<QuestionIssue>),

    /// Generative-AI call failed (network, quota, empty candidate)
    #[error("AI service error: {0}")]
    AiService(String),

    /// Uploaded document could not be turned into text
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// Durable store could not be read or written (wraps sqlx::Error)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid client request
    #[error("Bad request: {0}")]
    BadRequest(String),
}

fn format_issues(issues: &[QuestionIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
