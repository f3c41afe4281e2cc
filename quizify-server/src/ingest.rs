//! Document ingestion pipeline
//!
//! extract text → build prompt → generate → validate → store.
//!
//! The whole batch is validated before anything is written, and the rows are
//! inserted in one transaction, so a document either gets all of its
//! questions or none.

use chrono::{SecondsFormat, Utc};
use quizify_common::{validate, GeneratedBatch, Result};
use tracing::{info, warn};

use crate::AppState;

/// Prompt asking the model for `question_count` questions about `lecture_text`
pub fn build_prompt(lecture_text: &str, question_count: u32) -> String {
    format!(
        "Based on the following lecture content generate a list of questions.\n\
         Lecture content: {}.\n\
         Please focus on the key concepts and important points from the lecture to create \
         relevant questions. Provide {} questions.",
        lecture_text.trim(),
        question_count
    )
}

/// Current time in the format stored in `dateCreated`
pub fn creation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate, validate and persist questions for one uploaded PDF
///
/// Returns the validated batch (questions without ids).
pub async fn ingest_document(
    state: &AppState,
    file_name: &str,
    document: Vec<u8>,
) -> Result<GeneratedBatch> {
    let text = state.extractor.extract(document).await?;
    let prompt = build_prompt(&text, state.settings.question_count);

    let raw = state.generator.generate(&prompt).await?;

    let batch = validate(&raw).map_err(|e| {
        warn!(file_name, error = %e, "Rejected generated batch");
        e
    })?;

    let rows = batch.to_new_questions(file_name, &creation_timestamp());
    let ids = state.store.insert_batch(rows).await?;

    info!(
        file_name,
        questions = ids.len(),
        first_id = ids.first().copied(),
        "Stored generated questions"
    );

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_and_count() {
        let prompt = build_prompt("  Photosynthesis converts light.  ", 7);

        assert!(prompt.starts_with("Based on the following lecture content"));
        assert!(prompt.contains("Lecture content: Photosynthesis converts light.."));
        assert!(prompt.ends_with("Provide 7 questions."));
    }

    #[test]
    fn test_timestamp_is_rfc3339_millis_utc() {
        let ts = creation_timestamp();

        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        // 2024-01-01T00:00:00.000Z
        assert_eq!(ts.len(), 24);
    }
}
