//! # Quizify Common Library
//!
//! Shared code for the Quizify quiz service:
//! - Question records and the question store
//! - Validation of AI-generated question batches
//! - Answer normalization and grading
//! - Configuration loading and root folder resolution

pub mod config;
pub mod db;
pub mod error;
pub mod grading;
pub mod validation;

pub use error::{Error, QuestionIssue, Result};
pub use grading::{grade, is_correct, Answer, GradedAnswer, GradingResult, SubmittedAnswer};
pub use validation::{validate, validate_value, GeneratedBatch, GeneratedQuestion};
