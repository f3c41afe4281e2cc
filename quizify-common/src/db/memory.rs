//! In-memory question store for tests and throwaway runs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::models::{NewQuestion, QuestionRecord, ResourceSummary};
use crate::db::store::QuestionStore;
use crate::Result;

#[derive(Default)]
struct Inner {
    records: Vec<QuestionRecord>,
    last_id: i64,
}

/// Non-durable [`QuestionStore`] with the same id semantics as SQLite
/// AUTOINCREMENT (start at 1, never reused)
#[derive(Default)]
pub struct MemoryQuestionStore {
    inner: RwLock<Inner>,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn insert(&self, question: NewQuestion) -> Result<i64> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.records.push(QuestionRecord::from_new(id, question));
        Ok(id)
    }

    async fn insert_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<i64>> {
        // One write guard for the whole batch keeps it atomic to readers
        let mut inner = self.inner.write().await;
        let mut ids = Vec::with_capacity(questions.len());
        for question in questions {
            inner.last_id += 1;
            let id = inner.last_id;
            inner.records.push(QuestionRecord::from_new(id, question));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn list_all(&self) -> Result<Vec<QuestionRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn list_by_file_name(&self, file_name: &str) -> Result<Vec<QuestionRecord>> {
        Ok(self
            .inner
            .read()
            .await
            .records
            .iter()
            .filter(|record| record.source_file_name == file_name)
            .cloned()
            .collect())
    }

    async fn resource_summary(&self) -> Result<Vec<ResourceSummary>> {
        let inner = self.inner.read().await;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for record in &inner.records {
            *counts.entry(record.source_file_name.as_str()).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(file_name, question_count)| ResourceSummary {
                file_name: file_name.to_string(),
                question_count,
            })
            .collect())
    }
}
