//! Question store
//!
//! The store is the only durable state in the service. Handlers receive it as
//! an `Arc<dyn QuestionStore>` so tests can swap in [`MemoryQuestionStore`].
//!
//! [`MemoryQuestionStore`]: crate::db::MemoryQuestionStore

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::db::models::{DifficultyLevel, NewQuestion, QuestionRecord, QuestionType, ResourceSummary};
use crate::{Error, Result};

/// Keyed, append-only collection of question records
///
/// Reads observe every insert that returned successfully before the read
/// started. Records are never updated or deleted.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Append one record and return its assigned id
    async fn insert(&self, question: NewQuestion) -> Result<i64>;

    /// Append all records of one document, all-or-nothing
    ///
    /// Returns the assigned ids in input order.
    async fn insert_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<i64>>;

    /// Every record, in id order
    async fn list_all(&self) -> Result<Vec<QuestionRecord>>;

    /// Records generated from `file_name` (empty when none)
    async fn list_by_file_name(&self, file_name: &str) -> Result<Vec<QuestionRecord>>;

    /// Question count per distinct source file, ordered by file name
    async fn resource_summary(&self) -> Result<Vec<ResourceSummary>>;
}

const SELECT_COLUMNS: &str = "SELECT id, fileName, lectureTitle, lectureContent, questionText, \
     questionType, choices, correctAnswer, difficultyLevel, dateCreated FROM questions";

/// SQLite-backed question store
#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn insert_row<'e, E>(executor: E, question: &NewQuestion) -> Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO questions (fileName, lectureTitle, lectureContent, questionText,
                               questionType, choices, correctAnswer, difficultyLevel, dateCreated)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&question.source_file_name)
    .bind(&question.lecture_title)
    .bind(&question.lecture_content)
    .bind(&question.question_text)
    .bind(question.question_type.to_db_string())
    .bind(Json(&question.choices))
    .bind(&question.correct_answer)
    .bind(question.difficulty_level.to_db_string())
    .bind(&question.date_created)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

fn decode_error(column: &str, value: &str) -> Error {
    Error::StorageUnavailable(sqlx::Error::Decode(
        format!("unexpected {} value '{}'", column, value).into(),
    ))
}

/// Convert a `questions` row into a record
///
/// Text columns are nullable in older databases; NULL reads as empty.
fn record_from_row(row: &SqliteRow) -> Result<QuestionRecord> {
    let text = |column: &str| -> Result<String> {
        Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
    };

    let question_type_raw = text("questionType")?;
    let question_type = QuestionType::from_str(&question_type_raw)
        .ok_or_else(|| decode_error("questionType", &question_type_raw))?;

    let difficulty_raw = text("difficultyLevel")?;
    let difficulty_level = DifficultyLevel::from_str(&difficulty_raw)
        .ok_or_else(|| decode_error("difficultyLevel", &difficulty_raw))?;

    let choices = row
        .try_get::<Option<Json<Vec<String>>>, _>("choices")?
        .map(|json| json.0)
        .unwrap_or_default();

    Ok(QuestionRecord {
        id: row.try_get("id")?,
        source_file_name: text("fileName")?,
        lecture_title: text("lectureTitle")?,
        lecture_content: text("lectureContent")?,
        question_text: text("questionText")?,
        question_type,
        choices,
        correct_answer: text("correctAnswer")?,
        difficulty_level,
        date_created: text("dateCreated")?,
    })
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn insert(&self, question: NewQuestion) -> Result<i64> {
        let id = insert_row(&self.pool, &question).await?;
        debug!(id, file_name = %question.source_file_name, "Inserted question");
        Ok(id)
    }

    async fn insert_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<i64>> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(questions.len());

        for question in &questions {
            ids.push(insert_row(&mut *tx, question).await?);
        }

        tx.commit().await?;

        info!(count = ids.len(), "Inserted question batch");
        Ok(ids)
    }

    async fn list_all(&self) -> Result<Vec<QuestionRecord>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn list_by_file_name(&self, file_name: &str) -> Result<Vec<QuestionRecord>> {
        let rows = sqlx::query(&format!("{} WHERE fileName = ? ORDER BY id", SELECT_COLUMNS))
            .bind(file_name)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn resource_summary(&self) -> Result<Vec<ResourceSummary>> {
        let rows = sqlx::query_as::<_, (Option<String>, i64)>(
            r#"
            SELECT fileName, COUNT(*) AS questionCount
            FROM questions
            GROUP BY fileName
            ORDER BY fileName
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(file_name, question_count)| ResourceSummary {
                file_name: file_name.unwrap_or_default(),
                question_count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;

    fn sample(file_name: &str, text: &str) -> NewQuestion {
        NewQuestion {
            source_file_name: file_name.to_string(),
            lecture_title: "Geography".to_string(),
            lecture_content: "European capitals".to_string(),
            question_text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            choices: vec!["Paris".to_string(), "Rome".to_string(), "Berlin".to_string()],
            correct_answer: "Paris".to_string(),
            difficulty_level: DifficultyLevel::Easy,
            date_created: "2024-03-01T10:00:00.000Z".to_string(),
        }
    }

    async fn setup_store() -> SqliteQuestionStore {
        SqliteQuestionStore::new(init_memory_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_insert_round_trip() {
        let store = setup_store().await;
        let question = sample("a.pdf", "Capital of France?");

        let id = store.insert(question.clone()).await.unwrap();
        let all = store.list_all().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0], QuestionRecord::from_new(id, question));
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = setup_store().await;

        let first = store.insert(sample("a.pdf", "q1")).await.unwrap();
        let second = store.insert(sample("a.pdf", "q2")).await.unwrap();

        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_by_file_name() {
        let store = setup_store().await;
        store.insert(sample("a.pdf", "q1")).await.unwrap();
        store.insert(sample("b.pdf", "q2")).await.unwrap();
        store.insert(sample("a.pdf", "q3")).await.unwrap();

        let a = store.list_by_file_name("a.pdf").await.unwrap();
        let texts: Vec<_> = a.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["q1", "q3"]);

        assert!(store.list_by_file_name("missing.pdf").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resource_summary_counts() {
        let store = setup_store().await;
        for i in 0..3 {
            store.insert(sample("a.pdf", &format!("a{}", i))).await.unwrap();
        }
        for i in 0..2 {
            store.insert(sample("b.pdf", &format!("b{}", i))).await.unwrap();
        }

        let summary = store.resource_summary().await.unwrap();
        assert_eq!(
            summary,
            vec![
                ResourceSummary { file_name: "a.pdf".into(), question_count: 3 },
                ResourceSummary { file_name: "b.pdf".into(), question_count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_batch_returns_ids_in_order() {
        let store = setup_store().await;

        let ids = store
            .insert_batch(vec![sample("a.pdf", "q1"), sample("a.pdf", "q2")])
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_batch_rolls_back_on_storage_failure() {
        let store = setup_store().await;
        sqlx::query(
            "CREATE TRIGGER reject_poison BEFORE INSERT ON questions \
             WHEN NEW.questionText = 'poison' \
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store
            .insert_batch(vec![sample("a.pdf", "q1"), sample("a.pdf", "poison")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::StorageUnavailable(_)));
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.resource_summary().await.unwrap().is_empty());

        // The rolled-back row did not consume an id
        let id = store.insert(sample("a.pdf", "q2")).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_list_all_is_stable() {
        let store = setup_store().await;
        store.insert(sample("a.pdf", "q1")).await.unwrap();
        store.insert(sample("b.pdf", "q2")).await.unwrap();

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_legacy_null_columns_read_as_empty() {
        let store = setup_store().await;
        sqlx::query(
            "INSERT INTO questions (questionType, difficultyLevel, choices) \
             VALUES ('multiple-choice', 'hard', '[\"x\"]')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].source_file_name, "");
        assert_eq!(all[0].choices, vec!["x".to_string()]);
        assert_eq!(all[0].difficulty_level, DifficultyLevel::Hard);
    }

    #[tokio::test]
    async fn test_unknown_difficulty_is_storage_error() {
        let store = setup_store().await;
        sqlx::query(
            "INSERT INTO questions (questionType, difficultyLevel, choices) \
             VALUES ('multiple-choice', 'extreme', '[]')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }
}
