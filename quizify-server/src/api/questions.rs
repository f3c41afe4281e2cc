//! Question and resource listing endpoints
//!
//! `/resources` answers under the `questions` key, same as `/questions`;
//! existing clients read it from there.

use axum::{
    extract::{Path, State},
    Json,
};
use quizify_common::db::{QuestionRecord, ResourceSummary};
use serde::Serialize;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub questions: Vec<ResourceSummary>,
}

const QUESTIONS_ERROR: &str = "Could not retrieve questions";

/// GET /questions
pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let questions = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::Retrieval(QUESTIONS_ERROR, e))?;

    Ok(Json(QuestionsResponse { questions }))
}

/// GET /questions/:file_name
///
/// Unknown file names yield an empty list.
pub async fn questions_by_file_name(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let questions = state
        .store
        .list_by_file_name(&file_name)
        .await
        .map_err(|e| ApiError::Retrieval(QUESTIONS_ERROR, e))?;

    Ok(Json(QuestionsResponse { questions }))
}

/// GET /resources
pub async fn list_resources(
    State(state): State<AppState>,
) -> Result<Json<ResourcesResponse>, ApiError> {
    let resources = state
        .store
        .resource_summary()
        .await
        .map_err(|e| ApiError::Retrieval("Could not retrieve resources", e))?;

    Ok(Json(ResourcesResponse { questions: resources }))
}
