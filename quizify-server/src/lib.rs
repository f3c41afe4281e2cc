//! quizify-server library
//!
//! HTTP service that turns lecture PDFs into multiple-choice questions,
//! stores them, and grades submitted answers.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use quizify_common::db::QuestionStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod ai;
pub mod api;
pub mod config;
pub mod extract;
pub mod ingest;

use ai::QuestionGenerator;
use extract::DocumentExtractor;

/// Default number of questions requested per document
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Default upload limit for `/upload-pdf`
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Tunables for the ingestion pipeline
#[derive(Debug, Clone, Copy)]
pub struct IngestSettings {
    pub question_count: u32,
    pub max_upload_bytes: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Application state shared across HTTP handlers
///
/// Every collaborator is injected, so tests can run the full router against
/// an in-memory store and canned AI output.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
    pub generator: Arc<dyn QuestionGenerator>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub settings: IngestSettings,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn QuestionStore>,
        generator: Arc<dyn QuestionGenerator>,
        extractor: Arc<dyn DocumentExtractor>,
        settings: IngestSettings,
    ) -> Self {
        Self {
            store,
            generator,
            extractor,
            settings,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let upload_limit = state.settings.max_upload_bytes;

    Router::new()
        // Generation
        .route("/text", post(api::generate_text))
        .route("/upload-pdf", post(api::upload_pdf))
        // Retrieval
        .route("/questions", get(api::list_questions))
        .route("/questions/:file_name", get(api::questions_by_file_name))
        .route("/resources", get(api::list_resources))
        // Grading
        .route("/submit-answers", post(api::submit_answers))
        // Service info
        .route("/build_info", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
