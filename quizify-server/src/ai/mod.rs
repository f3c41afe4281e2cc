//! Generative-AI collaborator
//!
//! The service only needs one operation from the model: prompt text in, raw
//! JSON text out. Anything implementing [`QuestionGenerator`] can stand in
//! for Gemini (tests use canned responses).

use async_trait::async_trait;
use quizify_common::Result;

pub mod gemini;
pub mod schema;

pub use gemini::GeminiClient;

/// Prompt → raw JSON text
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate a response for `prompt`
    ///
    /// Fails with `Error::AiService` on network errors, non-success status,
    /// quota exhaustion or an empty candidate. Never retried.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
