use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use exam_core::model::{AttemptError, OptionLabel, TickOutcome};
use exam_core::scoring::Scorecard;

use crate::error::ExamError;
use super::service::{AttemptGeneration, ExamSession};
use super::view::{ExamView, TimerSnapshot};

/// Spacing between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives an `ExamSession` with a one-second countdown.
///
/// At most one tick task exists at a time. It is started with each attempt and
/// aborted on manual submit, on restart, and when the service is dropped; a
/// forced timeout ends it from the inside. Every mutation goes through the
/// session mutex, so user actions and ticks never interleave.
///
/// Must be created inside a Tokio runtime.
pub struct TimedExamService {
    session: Arc<Mutex<ExamSession>>,
    updates: Arc<watch::Sender<TimerSnapshot>>,
    ticker: Option<JoinHandle<()>>,
}

impl TimedExamService {
    /// Wrap a freshly started session and begin counting down.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(session: ExamSession) -> Self {
        let generation = session.generation();
        let (updates, _) = watch::channel(session.timer_snapshot());
        let mut service = Self {
            session: Arc::new(Mutex::new(session)),
            updates: Arc::new(updates),
            ticker: None,
        };
        service.spawn_ticker(generation);
        service
    }

    /// Receive a `TimerSnapshot` after every tick, submit and restart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }

    /// True while a tick task is scheduled for the current attempt.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Run a read-only closure against the session.
    pub async fn inspect<R>(&self, f: impl FnOnce(&ExamSession) -> R) -> R {
        let guard = self.session.lock().await;
        f(&guard)
    }

    pub async fn view(&self) -> ExamView {
        self.session.lock().await.view()
    }

    pub async fn scorecard(&self) -> Option<Scorecard> {
        self.session.lock().await.scorecard()
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the attempt is submitted or the option is empty.
    pub async fn select_option(&self, label: OptionLabel) -> Result<(), AttemptError> {
        self.session.lock().await.select_option(label)
    }

    pub async fn go_to_previous(&self) -> bool {
        self.session.lock().await.go_to_previous()
    }

    pub async fn go_to_next(&self) -> bool {
        self.session.lock().await.go_to_next()
    }

    /// Submit the attempt and stop the countdown.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if answers are missing or the attempt was already
    /// submitted; the countdown keeps running in the first case.
    pub async fn submit(&mut self) -> Result<(), AttemptError> {
        let snapshot = {
            let mut session = self.session.lock().await;
            session.submit()?;
            session.timer_snapshot()
        };
        self.cancel_ticker();
        self.updates.send_replace(snapshot);
        Ok(())
    }

    /// Discard the current attempt, sample a new one, and restart the countdown.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InsufficientBank` if a new quiz cannot be drawn; the
    /// previous attempt and its countdown are left as they were.
    pub async fn restart(&mut self) -> Result<AttemptGeneration, ExamError> {
        let (generation, snapshot) = {
            let mut session = self.session.lock().await;
            let generation = session.restart()?;
            (generation, session.timer_snapshot())
        };
        self.cancel_ticker();
        self.spawn_ticker(generation);
        self.updates.send_replace(snapshot);
        Ok(generation)
    }

    /// Stop the countdown without touching the attempt.
    pub fn shutdown(&mut self) {
        self.cancel_ticker();
    }

    fn spawn_ticker(&mut self, generation: AttemptGeneration) {
        let session = Arc::clone(&self.session);
        let updates = Arc::clone(&self.updates);
        self.ticker = Some(tokio::spawn(run_ticker(session, updates, generation)));
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for TimedExamService {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

async fn run_ticker(
    session: Arc<Mutex<ExamSession>>,
    updates: Arc<watch::Sender<TimerSnapshot>>,
    generation: AttemptGeneration,
) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    loop {
        interval.tick().await;

        let mut guard = session.lock().await;
        let Some(outcome) = guard.tick(generation) else {
            return;
        };
        updates.send_replace(guard.timer_snapshot());

        match outcome {
            TickOutcome::Running { .. } => {}
            TickOutcome::Expired | TickOutcome::Finished => {
                debug!(generation, "countdown finished");
                return;
            }
        }
    }
}
