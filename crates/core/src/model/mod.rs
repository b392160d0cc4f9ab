mod attempt;
mod ids;
mod label;
mod question;
mod settings;

pub use ids::{ParseIdError, QuestionId};
pub use label::{OptionLabel, OptionLabelError};

pub use attempt::{Attempt, AttemptError, AttemptStatus, SubmitReason, TickOutcome};
pub use question::{OptionSet, Question, QuestionError};
pub use settings::{ExamSettings, ExamSettingsError};
