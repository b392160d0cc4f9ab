use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamSettingsError {
    #[error("question count must be > 0")]
    InvalidQuestionCount,

    #[error("exam duration must be > 0 seconds")]
    InvalidDuration,

    #[error("pass percentage must be between 1 and 100")]
    InvalidPassPercent,
}

/// Shape of one exam attempt: how many questions, how long, and the pass mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSettings {
    question_count: usize,
    duration_secs: u32,
    pass_percent: u8,
}

impl ExamSettings {
    pub const STANDARD_QUESTION_COUNT: usize = 20;
    pub const STANDARD_DURATION_SECS: u32 = 45 * 60;
    pub const STANDARD_PASS_PERCENT: u8 = 75;

    /// The standard practice exam:
    /// - 20 questions drawn per attempt
    /// - 45 minutes on the clock
    /// - 75% (15 of 20) to pass
    #[must_use]
    pub fn standard() -> Self {
        Self {
            question_count: Self::STANDARD_QUESTION_COUNT,
            duration_secs: Self::STANDARD_DURATION_SECS,
            pass_percent: Self::STANDARD_PASS_PERCENT,
        }
    }

    /// Creates custom exam settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the count or duration is zero, or the percentage is outside 1..=100.
    pub fn new(
        question_count: usize,
        duration_secs: u32,
        pass_percent: u8,
    ) -> Result<Self, ExamSettingsError> {
        if question_count == 0 {
            return Err(ExamSettingsError::InvalidQuestionCount);
        }
        if duration_secs == 0 {
            return Err(ExamSettingsError::InvalidDuration);
        }
        if !(1..=100).contains(&pass_percent) {
            return Err(ExamSettingsError::InvalidPassPercent);
        }
        Ok(Self {
            question_count,
            duration_secs,
            pass_percent,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn pass_percent(&self) -> u8 {
        self.pass_percent
    }

    /// Minimum number of correct answers needed to pass: `ceil(count * percent / 100)`.
    #[must_use]
    pub fn pass_threshold(&self) -> usize {
        (self.question_count * usize::from(self.pass_percent)).div_ceil(100)
    }
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_exam_needs_fifteen_of_twenty() {
        let settings = ExamSettings::standard();
        assert_eq!(settings.question_count(), 20);
        assert_eq!(settings.duration_secs(), 2700);
        assert_eq!(settings.pass_threshold(), 15);
    }

    #[test]
    fn threshold_rounds_up() {
        let settings = ExamSettings::new(10, 60, 75).unwrap();
        assert_eq!(settings.pass_threshold(), 8);
        let settings = ExamSettings::new(3, 60, 100).unwrap();
        assert_eq!(settings.pass_threshold(), 3);
        let settings = ExamSettings::new(7, 60, 1).unwrap();
        assert_eq!(settings.pass_threshold(), 1);
    }

    #[test]
    fn rejects_degenerate_settings() {
        assert_eq!(
            ExamSettings::new(0, 60, 75).unwrap_err(),
            ExamSettingsError::InvalidQuestionCount
        );
        assert_eq!(
            ExamSettings::new(5, 0, 75).unwrap_err(),
            ExamSettingsError::InvalidDuration
        );
        assert_eq!(
            ExamSettings::new(5, 60, 0).unwrap_err(),
            ExamSettingsError::InvalidPassPercent
        );
        assert_eq!(
            ExamSettings::new(5, 60, 101).unwrap_err(),
            ExamSettingsError::InvalidPassPercent
        );
    }
}
