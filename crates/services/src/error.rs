//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{AttemptError, ExamSettingsError};
use storage::repository::StorageError;

/// Why a single raw bank record was dropped during loading.
///
/// These never reach the caller as failures; the loader logs and counts them.
/// `index` is the zero-based position of the record in the raw collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankValidationError {
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
    #[error("record {index} has no prompt")]
    MissingPrompt { index: usize },
    #[error("record {index} has no options")]
    MissingOptions { index: usize },
    #[error("record {index} has no answer")]
    MissingAnswer { index: usize },
    #[error("record {index} has an answer outside A-D: {raw:?}")]
    InvalidAnswer { index: usize, raw: String },
}

/// Errors emitted by exam session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamError {
    #[error("question bank has {available} valid questions but {required} are needed")]
    InsufficientBank { required: usize, available: usize },
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Settings(#[from] ExamSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while resolving configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {key} value: {raw:?}")]
    InvalidValue { key: &'static str, raw: String },
    #[error(transparent)]
    Settings(#[from] ExamSettingsError),
}
