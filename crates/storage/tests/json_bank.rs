use std::path::PathBuf;

use serde_json::json;
use storage::json::JsonFileQuestionBank;
use storage::repository::{QuestionBankRepository, Storage, StorageError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("exam-storage-{}-{name}.json", std::process::id()))
}

#[tokio::test]
async fn json_file_bank_loads_records() {
    let path = scratch_path("loads");
    let body = json!([
        {
            "question_number": 1,
            "question": "Which ocean borders the west coast?",
            "options": { "A": "Pacific", "B": "Atlantic", "C": "Arctic", "D": "Indian" },
            "answer": "A"
        },
        { "question_number": 2, "question": "" }
    ]);
    tokio::fs::write(&path, body.to_string()).await.unwrap();

    let bank = JsonFileQuestionBank::new(&path);
    let records = bank.load_records().await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["options"]["A"], "Pacific");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let storage = Storage::json_file(scratch_path("does-not-exist"));
    let err = storage.questions.load_records().await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn non_array_file_is_a_serialization_error() {
    let path = scratch_path("object");
    tokio::fs::write(&path, r#"{"questions": []}"#).await.unwrap();

    let err = JsonFileQuestionBank::new(&path)
        .load_records()
        .await
        .unwrap_err();
    tokio::fs::remove_file(&path).await.unwrap();

    assert!(matches!(err, StorageError::Serialization(_)));
}
