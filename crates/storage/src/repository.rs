use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::json::JsonFileQuestionBank;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// An unvalidated question record exactly as it appears in the source data.
///
/// Conceptually `{ question_number, question, options: {A,B,C,D}, answer }`, but any
/// field may be missing or mistyped; validation happens in the services layer.
pub type RawQuestionRecord = Value;

/// Read-only source of raw question records.
#[async_trait]
pub trait QuestionBankRepository: Send + Sync {
    /// Load every raw record in source order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or is not a list of records.
    async fn load_records(&self) -> Result<Vec<RawQuestionRecord>, StorageError>;
}

/// Simple in-memory bank for testing and embedding a bundled question set.
#[derive(Clone, Default)]
pub struct InMemoryQuestionBank {
    records: Arc<Vec<RawQuestionRecord>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new(records: Vec<RawQuestionRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

#[async_trait]
impl QuestionBankRepository for InMemoryQuestionBank {
    async fn load_records(&self) -> Result<Vec<RawQuestionRecord>, StorageError> {
        Ok(self.records.as_ref().clone())
    }
}

/// Holds the question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionBankRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(records: Vec<RawQuestionRecord>) -> Self {
        let questions: Arc<dyn QuestionBankRepository> =
            Arc::new(InMemoryQuestionBank::new(records));
        Self { questions }
    }

    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let questions: Arc<dyn QuestionBankRepository> =
            Arc::new(JsonFileQuestionBank::new(path));
        Self { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn in_memory_returns_records_in_order() {
        let bank = InMemoryQuestionBank::new(vec![
            json!({ "question_number": 1 }),
            json!({ "question_number": 2 }),
        ]);
        let records = bank.load_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["question_number"], 2);
    }

    #[tokio::test]
    async fn clones_share_the_same_records() {
        let bank = InMemoryQuestionBank::new(vec![json!({ "question_number": 5 })]);
        let copy = bank.clone();
        assert_eq!(
            bank.load_records().await.unwrap(),
            copy.load_records().await.unwrap()
        );
    }

    #[tokio::test]
    async fn storage_in_memory_is_usable_through_trait_object() {
        let storage = Storage::in_memory(vec![json!({ "question": "Q" })]);
        let records = storage.questions.load_records().await.unwrap();
        assert_eq!(records, vec![json!({ "question": "Q" })]);
    }
}
