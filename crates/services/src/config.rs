use std::path::PathBuf;

use exam_core::model::ExamSettings;

use crate::error::ConfigError;

pub const BANK_PATH_VAR: &str = "EXAM_BANK_PATH";
pub const QUESTION_COUNT_VAR: &str = "EXAM_QUESTION_COUNT";
pub const DURATION_SECS_VAR: &str = "EXAM_DURATION_SECS";
pub const PASS_PERCENT_VAR: &str = "EXAM_PASS_PERCENT";

pub const DEFAULT_BANK_PATH: &str = "data/questions.json";

/// Runtime configuration: where the bank lives and the shape of each attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamConfig {
    pub bank_path: PathBuf,
    pub settings: ExamSettings,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from(DEFAULT_BANK_PATH),
            settings: ExamSettings::standard(),
        }
    }
}

impl ExamConfig {
    /// Read `EXAM_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or the
    /// resulting settings are invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary lookup; unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed or the settings are invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ExamSettings::standard();

        let bank_path = lookup(BANK_PATH_VAR)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_BANK_PATH), PathBuf::from);
        let question_count = parse_or(&lookup, QUESTION_COUNT_VAR, defaults.question_count())?;
        let duration_secs = parse_or(&lookup, DURATION_SECS_VAR, defaults.duration_secs())?;
        let pass_percent = parse_or(&lookup, PASS_PERCENT_VAR, defaults.pass_percent())?;

        Ok(Self {
            bank_path,
            settings: ExamSettings::new(question_count, duration_secs, pass_percent)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, raw }),
    }
}
