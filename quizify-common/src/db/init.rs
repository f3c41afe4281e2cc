//! Database initialization
//!
//! Creates the database file and the `questions` table on first run. The
//! column layout matches the `questions.db` files written by earlier releases,
//! so an existing database is opened as-is.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// SQLite busy timeout applied to every pool
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets readers proceed while an ingestion transaction is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query(&format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS))
        .execute(&pool)
        .await?;

    create_questions_table(&pool).await?;

    info!("Database busy timeout set to {} ms", BUSY_TIMEOUT_MS);

    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// The pool is limited to one connection: every SQLite `:memory:` connection
/// is its own database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create_questions_table(&pool).await?;

    Ok(pool)
}

/// Create the questions table
///
/// `choices` holds a JSON array of strings.
pub async fn create_questions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lectureTitle TEXT,
            lectureContent TEXT,
            questionText TEXT,
            questionType TEXT,
            choices TEXT,
            correctAnswer TEXT,
            difficultyLevel TEXT,
            dateCreated TEXT,
            fileName TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_file_name ON questions(fileName)")
        .execute(pool)
        .await?;

    Ok(())
}
