use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{label::OptionLabel, question::Question, settings::ExamSettings};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a state transition was refused. The attempt is left untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("attempt already submitted")]
    AlreadySubmitted,

    #[error("only {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("option {0} has no text and cannot be selected")]
    EmptyOption(OptionLabel),

    #[error("expected {expected} questions, got {actual}")]
    WrongQuestionCount { expected: usize, actual: usize },
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitReason {
    /// The candidate submitted after answering every question.
    Manual,
    /// The countdown reached zero; unanswered questions count as wrong.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress,
    Submitted(SubmitReason),
}

/// Result of applying one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time was deducted and the attempt is still running.
    Running { remaining: u32 },
    /// This tick exhausted the clock and forced submission.
    Expired,
    /// The attempt was already submitted; nothing changed.
    Finished,
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One timed pass through a fixed, pre-sampled set of questions.
///
/// Answers are keyed by position in the quiz set, so `answers` can never name a
/// position outside `0..total`. Once submitted, the answers and the remaining
/// time are frozen; a new attempt is the only way back to `InProgress`.
#[derive(Debug, Clone)]
pub struct Attempt {
    questions: Vec<Question>,
    answers: BTreeMap<usize, OptionLabel>,
    position: usize,
    status: AttemptStatus,
    time_remaining: u32,
    duration_secs: u32,
    pass_threshold: usize,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// Start an attempt over an already sampled quiz set.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::WrongQuestionCount` unless exactly
    /// `settings.question_count()` questions are supplied.
    pub fn new(
        questions: Vec<Question>,
        settings: &ExamSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if questions.len() != settings.question_count() {
            return Err(AttemptError::WrongQuestionCount {
                expected: settings.question_count(),
                actual: questions.len(),
            });
        }

        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            position: 0,
            status: AttemptStatus::InProgress,
            time_remaining: settings.duration_secs(),
            duration_secs: settings.duration_secs(),
            pass_threshold: settings.pass_threshold(),
            started_at,
            submitted_at: None,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    #[must_use]
    pub fn answer_at(&self, position: usize) -> Option<OptionLabel> {
        self.answers.get(&position).copied()
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<OptionLabel> {
        self.answer_at(self.position)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, OptionLabel> {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self.status, AttemptStatus::Submitted(_))
    }

    #[must_use]
    pub fn submit_reason(&self) -> Option<SubmitReason> {
        match self.status {
            AttemptStatus::InProgress => None,
            AttemptStatus::Submitted(reason) => Some(reason),
        }
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn pass_threshold(&self) -> usize {
        self.pass_threshold
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.total()
    }

    /// True while in progress with every question answered.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitted() && self.answered_count() == self.total()
    }

    /// `(position + 1) / total`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        (self.position + 1) as f64 / self.total() as f64
    }

    /// Progress fraction as a whole percentage, rounded half up.
    #[must_use]
    pub fn progress_percent(&self) -> usize {
        let total = self.total();
        (200 * (self.position + 1) + total) / (2 * total)
    }

    /// Record `label` for the current position, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadySubmitted` after submission and
    /// `AttemptError::EmptyOption` when the option has no text.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }
        if self.current_question().options().is_missing(label) {
            return Err(AttemptError::EmptyOption(label));
        }
        self.answers.insert(self.position, label);
        Ok(())
    }

    /// Move one question back. Returns false at the first question or after submission.
    pub fn go_to_previous(&mut self) -> bool {
        if self.is_submitted() || self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Move one question forward. Returns false at the last question or after submission.
    pub fn go_to_next(&mut self) -> bool {
        if self.is_submitted() || self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Submit the attempt. Every question must have an answer.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadySubmitted` if already submitted and
    /// `AttemptError::Incomplete` while any question is unanswered.
    pub fn submit(&mut self, at: DateTime<Utc>) -> Result<(), AttemptError> {
        if self.is_submitted() {
            return Err(AttemptError::AlreadySubmitted);
        }
        if self.answered_count() != self.total() {
            return Err(AttemptError::Incomplete {
                answered: self.answered_count(),
                total: self.total(),
            });
        }
        self.finish(SubmitReason::Manual, at);
        Ok(())
    }

    /// Deduct one second. Reaching zero submits regardless of how many answers exist.
    pub fn tick(&mut self, at: DateTime<Utc>) -> TickOutcome {
        if self.is_submitted() {
            return TickOutcome::Finished;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finish(SubmitReason::TimedOut, at);
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining: self.time_remaining,
        }
    }

    fn finish(&mut self, reason: SubmitReason, at: DateTime<Utc>) {
        self.status = AttemptStatus::Submitted(reason);
        self.submitted_at = Some(at);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionSet, QuestionId};
    use crate::time::fixed_now;

    fn build_question(id: u64, correct: OptionLabel) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            OptionSet::new("a", "b", "c", "d"),
            correct,
        )
        .unwrap()
    }

    fn build_attempt(count: usize, duration_secs: u32) -> Attempt {
        let settings = ExamSettings::new(count, duration_secs, 75).unwrap();
        let questions = (1..=count as u64)
            .map(|id| build_question(id, OptionLabel::A))
            .collect();
        Attempt::new(questions, &settings, fixed_now()).unwrap()
    }

    fn answer_all(attempt: &mut Attempt) {
        loop {
            attempt.select_option(OptionLabel::B).unwrap();
            if !attempt.go_to_next() {
                break;
            }
        }
    }

    #[test]
    fn new_attempt_starts_fresh() {
        let attempt = build_attempt(20, 2700);
        assert_eq!(attempt.position(), 0);
        assert_eq!(attempt.answered_count(), 0);
        assert_eq!(attempt.status(), AttemptStatus::InProgress);
        assert_eq!(attempt.time_remaining(), 2700);
        assert_eq!(attempt.pass_threshold(), 15);
        assert!(attempt.is_first());
        assert!(!attempt.can_submit());
    }

    #[test]
    fn rejects_wrong_question_count() {
        let settings = ExamSettings::standard();
        let questions = vec![build_question(1, OptionLabel::A)];
        let err = Attempt::new(questions, &settings, fixed_now()).unwrap_err();
        assert_eq!(
            err,
            AttemptError::WrongQuestionCount {
                expected: 20,
                actual: 1
            }
        );
    }

    #[test]
    fn navigation_clamps_without_wrapping() {
        let mut attempt = build_attempt(3, 60);
        assert!(!attempt.go_to_previous());
        assert_eq!(attempt.position(), 0);

        assert!(attempt.go_to_next());
        assert!(attempt.go_to_next());
        assert!(attempt.is_last());
        assert!(!attempt.go_to_next());
        assert_eq!(attempt.position(), 2);

        assert!(attempt.go_to_previous());
        assert_eq!(attempt.position(), 1);
    }

    #[test]
    fn navigation_is_not_blocked_by_missing_answers() {
        let mut attempt = build_attempt(3, 60);
        assert!(attempt.go_to_next());
        assert!(attempt.go_to_next());
        assert_eq!(attempt.answered_count(), 0);
    }

    #[test]
    fn selecting_overwrites_previous_answer() {
        let mut attempt = build_attempt(3, 60);
        attempt.select_option(OptionLabel::A).unwrap();
        attempt.select_option(OptionLabel::C).unwrap();
        assert_eq!(attempt.current_answer(), Some(OptionLabel::C));
        assert_eq!(attempt.answered_count(), 1);
    }

    #[test]
    fn selecting_empty_option_is_refused() {
        let settings = ExamSettings::new(1, 60, 75).unwrap();
        let question = Question::new(
            QuestionId::new(1),
            "Q",
            OptionSet::new("a", "b", "", "d"),
            OptionLabel::A,
        )
        .unwrap();
        let mut attempt = Attempt::new(vec![question], &settings, fixed_now()).unwrap();

        let err = attempt.select_option(OptionLabel::C).unwrap_err();
        assert_eq!(err, AttemptError::EmptyOption(OptionLabel::C));
        assert!(attempt.answers().is_empty());
    }

    #[test]
    fn submit_requires_every_answer() {
        let mut attempt = build_attempt(3, 60);
        attempt.select_option(OptionLabel::A).unwrap();

        let err = attempt.submit(fixed_now()).unwrap_err();
        assert_eq!(
            err,
            AttemptError::Incomplete {
                answered: 1,
                total: 3
            }
        );
        assert!(!attempt.is_submitted());
        assert_eq!(attempt.submitted_at(), None);
    }

    #[test]
    fn submit_freezes_answers_and_navigation() {
        let mut attempt = build_attempt(3, 60);
        answer_all(&mut attempt);
        assert!(attempt.can_submit());
        attempt.submit(fixed_now()).unwrap();

        assert_eq!(attempt.submit_reason(), Some(SubmitReason::Manual));
        assert_eq!(attempt.submitted_at(), Some(fixed_now()));
        assert_eq!(
            attempt.select_option(OptionLabel::D),
            Err(AttemptError::AlreadySubmitted)
        );
        assert!(!attempt.go_to_previous());
        assert_eq!(attempt.submit(fixed_now()), Err(AttemptError::AlreadySubmitted));
        assert!(attempt.answers().values().all(|l| *l == OptionLabel::B));
    }

    #[test]
    fn ticks_count_down_then_force_submit() {
        let mut attempt = build_attempt(3, 3);
        attempt.select_option(OptionLabel::A).unwrap();

        assert_eq!(attempt.tick(fixed_now()), TickOutcome::Running { remaining: 2 });
        assert_eq!(attempt.tick(fixed_now()), TickOutcome::Running { remaining: 1 });
        assert_eq!(attempt.tick(fixed_now()), TickOutcome::Expired);

        assert_eq!(attempt.time_remaining(), 0);
        assert_eq!(attempt.submit_reason(), Some(SubmitReason::TimedOut));
        assert_eq!(attempt.answered_count(), 1);
    }

    #[test]
    fn time_is_frozen_after_submission() {
        let mut attempt = build_attempt(2, 100);
        attempt.tick(fixed_now());
        answer_all(&mut attempt);
        attempt.submit(fixed_now()).unwrap();

        assert_eq!(attempt.tick(fixed_now()), TickOutcome::Finished);
        assert_eq!(attempt.time_remaining(), 99);
    }

    #[test]
    fn progress_tracks_position() {
        let mut attempt = build_attempt(20, 60);
        assert_eq!(attempt.progress_percent(), 5);
        assert!((attempt.progress_fraction() - 0.05).abs() < f64::EPSILON);
        while attempt.go_to_next() {}
        assert_eq!(attempt.progress_percent(), 100);

        let mut attempt = build_attempt(3, 60);
        assert_eq!(attempt.progress_percent(), 33);
        attempt.go_to_next();
        assert_eq!(attempt.progress_percent(), 67);
    }
}
