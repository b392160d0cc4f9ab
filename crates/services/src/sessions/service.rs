use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info, warn};

use exam_core::model::{Attempt, AttemptError, ExamSettings, OptionLabel, TickOutcome};
use exam_core::scoring::{self, Scorecard};

use crate::Clock;
use crate::bank_service::QuestionBank;
use crate::error::ExamError;
use super::plan::sample_quiz;
use super::progress::ExamProgress;
use super::view::{ExamScreen, ExamView, QuestionView, TimerSnapshot};

/// Identifies one attempt within a session. Bumped on every restart.
pub type AttemptGeneration = u64;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Owns the validated bank and exactly one live `Attempt`.
///
/// Every attempt gets a fresh generation number. Countdown ticks carry the
/// generation they were scheduled for, and ticks for any other generation are
/// ignored, so a tick sequence left over from a replaced attempt can never
/// touch its successor.
pub struct ExamSession {
    bank: QuestionBank,
    settings: ExamSettings,
    clock: Clock,
    rng: StdRng,
    attempt: Attempt,
    generation: AttemptGeneration,
}

impl ExamSession {
    /// Start the first attempt, sampling with an OS-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InsufficientBank` if the bank cannot fill a quiz.
    pub fn start(
        bank: QuestionBank,
        settings: ExamSettings,
        clock: Clock,
    ) -> Result<Self, ExamError> {
        Self::start_with_rng(bank, settings, clock, StdRng::from_os_rng())
    }

    /// Start the first attempt with a caller-supplied generator (e.g. seeded in tests).
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InsufficientBank` if the bank cannot fill a quiz.
    pub fn start_with_rng(
        bank: QuestionBank,
        settings: ExamSettings,
        clock: Clock,
        mut rng: StdRng,
    ) -> Result<Self, ExamError> {
        let attempt = draw_attempt(&bank, &settings, clock, &mut rng)?;
        let generation = 1;
        info!(generation, bank = bank.len(), "exam attempt started");

        Ok(Self {
            bank,
            settings,
            clock,
            rng,
            attempt,
            generation,
        })
    }

    /// Replace the current attempt with a freshly sampled one.
    ///
    /// On error the current attempt is kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InsufficientBank` if the bank cannot fill a quiz.
    pub fn restart(&mut self) -> Result<AttemptGeneration, ExamError> {
        let attempt = draw_attempt(&self.bank, &self.settings, self.clock, &mut self.rng)?;
        self.attempt = attempt;
        self.generation += 1;
        info!(generation = self.generation, "exam attempt restarted");
        Ok(self.generation)
    }

    #[must_use]
    pub fn generation(&self) -> AttemptGeneration {
        self.generation
    }

    #[must_use]
    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the attempt is submitted or the option is empty.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), AttemptError> {
        self.attempt.select_option(label)
    }

    pub fn go_to_previous(&mut self) -> bool {
        self.attempt.go_to_previous()
    }

    pub fn go_to_next(&mut self) -> bool {
        self.attempt.go_to_next()
    }

    /// Submit the current attempt once every question has an answer.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Incomplete` or `AttemptError::AlreadySubmitted`;
    /// the attempt is unchanged in both cases.
    pub fn submit(&mut self) -> Result<(), AttemptError> {
        self.attempt.submit(self.clock.now())?;
        info!(
            generation = self.generation,
            answered = self.attempt.answered_count(),
            "exam attempt submitted"
        );
        Ok(())
    }

    /// Apply one countdown tick scheduled for `generation`.
    ///
    /// Returns `None` when the tick belongs to a replaced attempt; the current
    /// attempt is not touched in that case.
    pub fn tick(&mut self, generation: AttemptGeneration) -> Option<TickOutcome> {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "ignoring tick from replaced attempt"
            );
            return None;
        }

        let outcome = self.attempt.tick(self.clock.now());
        if outcome == TickOutcome::Expired {
            info!(
                generation,
                answered = self.attempt.answered_count(),
                total = self.attempt.total(),
                "time expired, attempt auto-submitted"
            );
        }
        Some(outcome)
    }

    /// Grade the current attempt; `None` until it is submitted.
    #[must_use]
    pub fn scorecard(&self) -> Option<Scorecard> {
        scoring::grade(&self.attempt)
    }

    #[must_use]
    pub fn progress(&self) -> ExamProgress {
        ExamProgress {
            total: self.attempt.total(),
            answered: self.attempt.answered_count(),
            position: self.attempt.position(),
            percent: self.attempt.progress_percent(),
            can_submit: self.attempt.can_submit(),
        }
    }

    #[must_use]
    pub fn timer_snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from_attempt(self.generation, &self.attempt)
    }

    #[must_use]
    pub fn view(&self) -> ExamView {
        let screen = match self.scorecard() {
            Some(card) => ExamScreen::Review(card),
            None => ExamScreen::Question(QuestionView::from_attempt(&self.attempt)),
        };
        ExamView {
            generation: self.generation,
            progress: self.progress(),
            timer: self.timer_snapshot(),
            screen,
        }
    }
}

fn draw_attempt(
    bank: &QuestionBank,
    settings: &ExamSettings,
    clock: Clock,
    rng: &mut StdRng,
) -> Result<Attempt, ExamError> {
    let required = settings.question_count();
    let questions = sample_quiz(bank.questions(), required, rng);
    if questions.len() < required {
        warn!(
            required,
            available = bank.len(),
            "question bank too small to start an exam"
        );
        return Err(ExamError::InsufficientBank {
            required,
            available: bank.len(),
        });
    }
    Ok(Attempt::new(questions, settings, clock.now())?)
}

impl fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamSession")
            .field("generation", &self.generation)
            .field("bank_len", &self.bank.len())
            .field("position", &self.attempt.position())
            .field("answered", &self.attempt.answered_count())
            .field("status", &self.attempt.status())
            .field("time_remaining", &self.attempt.time_remaining())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
