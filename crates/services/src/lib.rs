#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_service;
pub mod config;
pub mod error;
pub mod sessions;

pub use exam_core::Clock;
pub use sessions as session;

pub use app_services::ExamServices;
pub use bank_service::{QuestionBank, QuestionBankService, load_bank};
pub use config::ExamConfig;
pub use error::{BankValidationError, ConfigError, ExamError};

pub use sessions::{
    AttemptGeneration, ExamProgress, ExamScreen, ExamSession, ExamView, OptionView, QuestionView,
    TimedExamService, TimerSnapshot, sample_quiz,
};
