mod plan;
mod progress;
mod service;
mod timer;
mod view;

// Public API of the exam session subsystem.
pub use crate::error::ExamError;
pub use plan::sample_quiz;
pub use progress::ExamProgress;
pub use service::{AttemptGeneration, ExamSession};
pub use timer::{TICK_PERIOD, TimedExamService};
pub use view::{ExamScreen, ExamView, OptionView, QuestionView, TimerSnapshot};
