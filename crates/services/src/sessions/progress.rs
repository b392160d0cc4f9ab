use serde::Serialize;

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamProgress {
    pub total: usize,
    pub answered: usize,
    /// Zero-based index of the question on screen.
    pub position: usize,
    /// `(position + 1) / total` as a rounded percentage.
    pub percent: usize,
    pub can_submit: bool,
}
