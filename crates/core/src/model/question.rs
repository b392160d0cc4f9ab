use thiserror::Error;

use crate::model::{ids::QuestionId, label::OptionLabel};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// The four answer texts of a question, one per label.
///
/// Every label is always present; a missing option is stored as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    texts: [String; 4],
}

impl OptionSet {
    /// Builds an option set, trimming each text.
    #[must_use]
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Self {
        let mut set = Self::default();
        set.set(OptionLabel::A, a);
        set.set(OptionLabel::B, b);
        set.set(OptionLabel::C, c);
        set.set(OptionLabel::D, d);
        set
    }

    /// Replaces the text for `label`, trimming it.
    pub fn set(&mut self, label: OptionLabel, text: impl Into<String>) {
        let text: String = text.into();
        self.texts[label.index()] = text.trim().to_string();
    }

    #[must_use]
    pub fn get(&self, label: OptionLabel) -> &str {
        &self.texts[label.index()]
    }

    /// Returns true when the option for `label` has no text.
    #[must_use]
    pub fn is_missing(&self, label: OptionLabel) -> bool {
        self.get(label).is_empty()
    }

    /// Iterates `(label, text)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated single-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: OptionSet,
    correct: OptionLabel,
}

impl Question {
    /// Creates a question.
    ///
    /// The prompt must be non-empty as given; it is trimmed afterwards, so a
    /// whitespace-only prompt is stored as an empty string.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is empty.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: OptionSet,
        correct: OptionLabel,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        Ok(Self {
            id,
            prompt: prompt.trim().to_string(),
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    #[must_use]
    pub fn correct_label(&self) -> OptionLabel {
        self.correct
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.options.get(self.correct)
    }

    #[must_use]
    pub fn is_correct(&self, picked: OptionLabel) -> bool {
        picked == self.correct
    }
}
