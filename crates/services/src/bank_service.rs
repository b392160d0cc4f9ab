use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use exam_core::model::{OptionLabel, OptionSet, Question, QuestionId};
use storage::repository::{QuestionBankRepository, RawQuestionRecord};

use crate::error::{BankValidationError, ExamError};

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// The validated bank: every question that survived loading, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    rejected: usize,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            rejected: 0,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of raw records dropped as malformed.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

//
// ─── LOADER ────────────────────────────────────────────────────────────────────
//

/// Validate and normalize raw records into a bank.
///
/// Malformed records are dropped without failing the load; each one is logged
/// at debug level and counted in `QuestionBank::rejected`.
#[must_use]
pub fn load_bank(records: &[RawQuestionRecord]) -> QuestionBank {
    let mut questions = Vec::with_capacity(records.len());
    let mut rejected = 0;

    for (index, record) in records.iter().enumerate() {
        match validate_record(index, record) {
            Ok(question) => questions.push(question),
            Err(err) => {
                debug!(%err, "dropping malformed question record");
                rejected += 1;
            }
        }
    }

    QuestionBank {
        questions,
        rejected,
    }
}

/// Turn one raw record into a `Question`.
///
/// A record is valid when it is an object with a non-empty prompt, a truthy
/// `options` value, and an answer that normalizes to one of `A`..`D`. The
/// prompt is trimmed after that check, so a whitespace-only prompt is kept as
/// an empty one. Absent or falsy options become empty strings, and an
/// `options` value that is not an object yields four empty options.
///
/// # Errors
///
/// Returns the `BankValidationError` describing the first problem found.
pub fn validate_record(index: usize, record: &Value) -> Result<Question, BankValidationError> {
    let Value::Object(fields) = record else {
        return Err(BankValidationError::NotAnObject { index });
    };

    let prompt = fields
        .get("question")
        .and_then(truthy_text)
        .ok_or(BankValidationError::MissingPrompt { index })?;

    let raw_options = fields
        .get("options")
        .filter(|value| is_truthy(value))
        .ok_or(BankValidationError::MissingOptions { index })?;

    let raw_answer = fields
        .get("answer")
        .and_then(truthy_text)
        .ok_or(BankValidationError::MissingAnswer { index })?;
    let correct = OptionLabel::parse(&raw_answer).map_err(|_| {
        BankValidationError::InvalidAnswer {
            index,
            raw: raw_answer.clone(),
        }
    })?;

    let id = fields
        .get("question_number")
        .and_then(parse_question_id)
        .unwrap_or_else(|| QuestionId::new(index as u64 + 1));

    Question::new(id, prompt, normalize_options(raw_options), correct)
        .map_err(|_| BankValidationError::MissingPrompt { index })
}

fn normalize_options(raw: &Value) -> OptionSet {
    let mut options = OptionSet::default();
    let Value::Object(raw) = raw else {
        return options;
    };
    for label in OptionLabel::ALL {
        if let Some(text) = raw.get(label.as_str()).and_then(truthy_text) {
            options.set(label, text);
        }
    }
    options
}

/// Whether the source data treats `value` as present.
///
/// Containers are always present, even when empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a scalar that the source data treats as present.
///
/// `null`, `false`, zero and the empty string count as absent; containers have no text.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_question_id(value: &Value) -> Option<QuestionId> {
    match value {
        Value::Number(n) => n.as_u64().map(QuestionId::new),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Loads the raw bank from storage and validates it.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionBankRepository>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionBankRepository>) -> Self {
        Self { source }
    }

    /// Fetch and validate the bank.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Storage` when the source cannot be read.
    pub async fn load(&self) -> Result<QuestionBank, ExamError> {
        let records = self.source.load_records().await?;
        let bank = load_bank(&records);
        info!(
            accepted = bank.len(),
            rejected = bank.rejected(),
            "question bank loaded"
        );
        Ok(bank)
    }
}
