//! HTTP API handlers for quizify-server

pub mod answers;
pub mod buildinfo;
pub mod error;
pub mod generate;
pub mod health;
pub mod json;
pub mod questions;

pub use answers::submit_answers;
pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use generate::{generate_text, upload_pdf};
pub use health::health_routes;
pub use json::ApiJson;
pub use questions::{list_questions, list_resources, questions_by_file_name};
