//! Answer submission and grading

use axum::{extract::State, Json};
use quizify_common::{grade, GradingResult, SubmittedAnswer};
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiError, ApiJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}

/// POST /submit-answers
///
/// Grades against a snapshot of the full question set.
pub async fn submit_answers(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitRequest>,
) -> Result<Json<GradingResult>, ApiError> {
    let questions = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::Retrieval("Could not retrieve questions", e))?;

    let result = grade(&request.answers, &questions);

    info!(
        submitted = request.answers.len(),
        graded = result.total_questions,
        score = result.score,
        "Graded submission"
    );

    Ok(Json(result))
}
