use rand::rngs::StdRng;
use std::sync::Arc;

use exam_core::model::ExamSettings;
use storage::repository::Storage;

use crate::Clock;
use crate::bank_service::{QuestionBank, QuestionBankService};
use crate::config::ExamConfig;
use crate::error::ExamError;
use crate::sessions::{ExamSession, TimedExamService};

/// Assembles the exam services from a question source and settings.
#[derive(Clone)]
pub struct ExamServices {
    clock: Clock,
    settings: ExamSettings,
    bank: Arc<QuestionBankService>,
}

impl ExamServices {
    #[must_use]
    pub fn new(storage: &Storage, settings: ExamSettings, clock: Clock) -> Self {
        Self {
            clock,
            settings,
            bank: Arc::new(QuestionBankService::new(Arc::clone(&storage.questions))),
        }
    }

    /// Build services reading the bank from the configured JSON file.
    #[must_use]
    pub fn from_config(config: &ExamConfig, clock: Clock) -> Self {
        Self::new(
            &Storage::json_file(config.bank_path.clone()),
            config.settings,
            clock,
        )
    }

    /// Load and validate the bank.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Storage` when the source cannot be read.
    pub async fn load_bank(&self) -> Result<QuestionBank, ExamError> {
        self.bank.load().await
    }

    /// Load the bank, sample the first attempt, and start its countdown.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Storage` when the bank cannot be read and
    /// `ExamError::InsufficientBank` when it holds too few valid questions.
    pub async fn start_exam(&self) -> Result<TimedExamService, ExamError> {
        let bank = self.load_bank().await?;
        let session = ExamSession::start(bank, self.settings, self.clock)?;
        Ok(TimedExamService::start(session))
    }

    /// Same as `start_exam`, sampling with the given generator.
    ///
    /// # Errors
    ///
    /// See `start_exam`.
    pub async fn start_exam_with_rng(&self, rng: StdRng) -> Result<TimedExamService, ExamError> {
        let bank = self.load_bank().await?;
        let session = ExamSession::start_with_rng(bank, self.settings, self.clock, rng)?;
        Ok(TimedExamService::start(session))
    }
}
