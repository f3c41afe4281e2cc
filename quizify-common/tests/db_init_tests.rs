//! Tests for on-disk database initialization and the SQLite question store

use quizify_common::db::init::init_database;
use quizify_common::db::{
    DifficultyLevel, NewQuestion, QuestionStore, QuestionType, SqliteQuestionStore,
};

fn sample(file_name: &str, text: &str) -> NewQuestion {
    NewQuestion {
        source_file_name: file_name.to_string(),
        lecture_title: "Networks".to_string(),
        lecture_content: "TCP and UDP".to_string(),
        question_text: text.to_string(),
        question_type: QuestionType::MultipleChoice,
        choices: vec!["TCP".to_string(), "UDP".to_string()],
        correct_answer: "TCP".to_string(),
        difficulty_level: DifficultyLevel::Medium,
        date_created: "2024-03-01T10:00:00.000Z".to_string(),
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sub").join("questions.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("questions.db");

    {
        let pool = init_database(&db_path).await.unwrap();
        let store = SqliteQuestionStore::new(pool.clone());
        store.insert(sample("a.pdf", "Which protocol is reliable?")).await.unwrap();
        pool.close().await;
    }

    let pool = init_database(&db_path).await.unwrap();
    let store = SqliteQuestionStore::new(pool);
    let all = store.list_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].question_text, "Which protocol is reliable?");
    assert_eq!(all[0].choices, vec!["TCP".to_string(), "UDP".to_string()]);
}

#[tokio::test]
async fn test_ids_not_reused_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("questions.db");

    let pool = init_database(&db_path).await.unwrap();
    let store = SqliteQuestionStore::new(pool.clone());
    let ids = store
        .insert_batch(vec![sample("a.pdf", "q1"), sample("a.pdf", "q2")])
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let store = SqliteQuestionStore::new(pool);
    let next = store.insert(sample("b.pdf", "q3")).await.unwrap();

    assert_eq!(ids, vec![1, 2]);
    assert_eq!(next, 3);
}

#[tokio::test]
async fn test_closed_pool_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("questions.db")).await.unwrap();
    let store = SqliteQuestionStore::new(pool.clone());
    pool.close().await;

    let err = store.insert(sample("a.pdf", "q")).await.unwrap_err();
    assert!(matches!(err, quizify_common::Error::StorageUnavailable(_)));
}
