//! Database models and the question store

pub mod init;
pub mod memory;
pub mod models;
pub mod store;

pub use init::*;
pub use memory::MemoryQuestionStore;
pub use models::*;
pub use store::{QuestionStore, SqliteQuestionStore};
