//! API error responses
//!
//! Server-side failures are opaque to clients: the body carries a fixed
//! message and the details go to the log.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quizify_common::Error;
use serde_json::json;
use tracing::error;

/// Handler errors
#[derive(Debug)]
pub enum ApiError {
    /// Malformed client request (400)
    BadRequest(String),
    /// Extraction, AI call, validation or insert failed (500)
    Generation(Error),
    /// Reading stored data failed (500); carries the public message
    Retrieval(&'static str, Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::BadRequest(msg) => ApiError::BadRequest(msg),
            other => ApiError::Generation(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Generation(err) => {
                error!("Question generation failed: {}", err);
                let message = match err {
                    Error::MissingQuestionsField | Error::MalformedJson(_) => {
                        "Invalid response format. 'questions' field is missing or not an array."
                    }
                    Error::InvalidQuestionShape(_) => {
                        "Invalid response format. Generated questions failed validation."
                    }
                    _ => "Something went wrong",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Retrieval(message, err) => {
                error!("{}: {}", message, err);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let bad = ApiError::from(Error::BadRequest("no file".into())).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let ai = ApiError::from(Error::AiService("quota".into())).into_response();
        assert_eq!(ai.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let read = ApiError::Retrieval(
            "Could not retrieve questions",
            Error::Config("x".into()),
        )
        .into_response();
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
