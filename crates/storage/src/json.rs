use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionBankRepository, RawQuestionRecord, StorageError};

/// Question bank backed by a JSON file holding an array of records.
///
/// The file is re-read on every load; nothing is cached.
#[derive(Debug, Clone)]
pub struct JsonFileQuestionBank {
    path: PathBuf,
}

impl JsonFileQuestionBank {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionBankRepository for JsonFileQuestionBank {
    async fn load_records(&self) -> Result<Vec<RawQuestionRecord>, StorageError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::NotFound(self.path.display().to_string()),
                _ => StorageError::Io(format!("{}: {e}", self.path.display())),
            })?;
        parse_records(&text)
    }
}

/// Parse a JSON document that must be a top-level array.
pub(crate) fn parse_records(text: &str) -> Result<Vec<RawQuestionRecord>, StorageError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| StorageError::Serialization(e.to_string()))?;
    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => Err(StorageError::Serialization(format!(
            "expected a JSON array of questions, found {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
