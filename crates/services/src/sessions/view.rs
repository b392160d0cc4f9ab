//! Presentation-agnostic read models for a front end.
//!
//! Nothing here is styled or localized; labels and texts are passed through as-is.

use serde::Serialize;

use exam_core::model::{Attempt, OptionLabel, QuestionId};
use exam_core::scoring::Scorecard;
use exam_core::time::{LOW_TIME_SECS, format_countdown};

use super::progress::ExamProgress;
use super::service::AttemptGeneration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: OptionLabel,
    pub text: String,
    pub selected: bool,
    /// False when the option has no text; selecting it is refused.
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub position: usize,
    /// One-based question number for display.
    pub number: usize,
    pub total: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub is_first: bool,
    pub is_last: bool,
    pub can_submit: bool,
}

impl QuestionView {
    #[must_use]
    pub fn from_attempt(attempt: &Attempt) -> Self {
        let question = attempt.current_question();
        let picked = attempt.current_answer();
        let options = question
            .options()
            .iter()
            .map(|(label, text)| OptionView {
                label,
                text: text.to_string(),
                selected: picked == Some(label),
                enabled: !text.is_empty(),
            })
            .collect();

        Self {
            position: attempt.position(),
            number: attempt.position() + 1,
            total: attempt.total(),
            question_id: question.id(),
            prompt: question.prompt().to_string(),
            options,
            is_first: attempt.is_first(),
            is_last: attempt.is_last(),
            can_submit: attempt.can_submit(),
        }
    }
}

/// Countdown state published after every tick, submit and restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub generation: AttemptGeneration,
    pub remaining_secs: u32,
    /// `mm:ss`
    pub display: String,
    pub is_low: bool,
    pub submitted: bool,
}

impl TimerSnapshot {
    #[must_use]
    pub fn from_attempt(generation: AttemptGeneration, attempt: &Attempt) -> Self {
        let remaining_secs = attempt.time_remaining();
        Self {
            generation,
            remaining_secs,
            display: format_countdown(remaining_secs),
            is_low: remaining_secs <= LOW_TIME_SECS,
            submitted: attempt.is_submitted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ExamScreen {
    Question(QuestionView),
    Review(Scorecard),
}

/// Everything a front end needs to draw the current attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamView {
    pub generation: AttemptGeneration,
    pub progress: ExamProgress,
    pub timer: TimerSnapshot,
    pub screen: ExamScreen,
}
