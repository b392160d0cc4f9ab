//! Grading of submitted attempts.
//!
//! Scoring is a pure read over a frozen `Attempt`: one point per position whose
//! recorded label matches the question's correct label. Unanswered positions
//! simply never match.

use serde::Serialize;

use crate::model::{Attempt, OptionLabel, QuestionId, SubmitReason};

/// Per-position outcome shown on the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub position: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub picked: Option<OptionLabel>,
    /// Empty when nothing was picked.
    pub picked_text: String,
    pub correct: OptionLabel,
    pub correct_text: String,
    pub is_correct: bool,
}

/// Aggregate result of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    pub score: usize,
    pub total: usize,
    pub pass_threshold: usize,
    pub passed: bool,
    pub reason: SubmitReason,
    pub reviews: Vec<QuestionReview>,
}

impl Scorecard {
    /// Score as a whole percentage of the total, rounded half up.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (200 * self.score + self.total) / (2 * self.total)
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.reviews.iter().filter(|r| r.picked.is_none()).count()
    }
}

/// Grade a submitted attempt. Returns `None` while the attempt is still in progress.
#[must_use]
pub fn grade(attempt: &Attempt) -> Option<Scorecard> {
    let reason = attempt.submit_reason()?;

    let reviews: Vec<QuestionReview> = attempt
        .questions()
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let picked = attempt.answer_at(position);
            QuestionReview {
                position,
                question_id: question.id(),
                prompt: question.prompt().to_string(),
                picked,
                picked_text: picked
                    .map(|label| question.options().get(label).to_string())
                    .unwrap_or_default(),
                correct: question.correct_label(),
                correct_text: question.correct_text().to_string(),
                is_correct: picked.is_some_and(|label| question.is_correct(label)),
            }
        })
        .collect();

    let score = reviews.iter().filter(|r| r.is_correct).count();
    let pass_threshold = attempt.pass_threshold();

    Some(Scorecard {
        score,
        total: attempt.total(),
        pass_threshold,
        passed: score >= pass_threshold,
        reason,
        reviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExamSettings, OptionSet, Question};
    use crate::time::fixed_now;

    fn build_attempt(count: usize) -> Attempt {
        let settings = ExamSettings::new(count, 2700, 75).unwrap();
        let questions = (0..count)
            .map(|i| {
                Question::new(
                    QuestionId::new(i as u64 + 1),
                    format!("Q{i}"),
                    OptionSet::new("a", "b", "c", "d"),
                    OptionLabel::ALL[i % 4],
                )
                .unwrap()
            })
            .collect();
        Attempt::new(questions, &settings, fixed_now()).unwrap()
    }

    /// Answer the first `correct` questions right and the rest wrong, then submit.
    fn submit_with_correct(count: usize, correct: usize) -> Attempt {
        let mut attempt = build_attempt(count);
        for i in 0..count {
            let right = attempt.current_question().correct_label();
            let label = if i < correct {
                right
            } else {
                OptionLabel::ALL[(right.index() + 1) % 4]
            };
            attempt.select_option(label).unwrap();
            attempt.go_to_next();
        }
        attempt.submit(fixed_now()).unwrap();
        attempt
    }

    #[test]
    fn in_progress_attempt_has_no_scorecard() {
        assert!(grade(&build_attempt(20)).is_none());
    }

    #[test]
    fn fifteen_of_twenty_passes() {
        let card = grade(&submit_with_correct(20, 15)).unwrap();
        assert_eq!(card.score, 15);
        assert_eq!(card.pass_threshold, 15);
        assert!(card.passed);
        assert_eq!(card.percent(), 75);
        assert_eq!(card.reason, SubmitReason::Manual);
    }

    #[test]
    fn fourteen_of_twenty_fails() {
        let card = grade(&submit_with_correct(20, 14)).unwrap();
        assert_eq!(card.score, 14);
        assert!(!card.passed);
        assert_eq!(card.percent(), 70);
    }

    #[test]
    fn grading_is_repeatable() {
        let attempt = submit_with_correct(20, 11);
        assert_eq!(grade(&attempt), grade(&attempt));
    }

    #[test]
    fn unanswered_questions_count_as_wrong_after_timeout() {
        let mut attempt = build_attempt(4);
        for _ in 0..3 {
            let right = attempt.current_question().correct_label();
            attempt.select_option(right).unwrap();
            attempt.go_to_next();
        }
        while attempt.tick(fixed_now()) != crate::model::TickOutcome::Expired {}

        let card = grade(&attempt).unwrap();
        assert_eq!(card.score, 3);
        assert_eq!(card.total, 4);
        assert_eq!(card.unanswered(), 1);
        assert_eq!(card.reason, SubmitReason::TimedOut);

        let missing = &card.reviews[3];
        assert_eq!(missing.picked, None);
        assert_eq!(missing.picked_text, "");
        assert!(!missing.is_correct);
    }

    #[test]
    fn reviews_carry_picked_and_correct_text() {
        let card = grade(&submit_with_correct(4, 1)).unwrap();
        let first = &card.reviews[0];
        assert!(first.is_correct);
        assert_eq!(first.picked_text, first.correct_text);

        let second = &card.reviews[1];
        assert!(!second.is_correct);
        assert_eq!(second.correct, OptionLabel::B);
        assert_eq!(second.correct_text, "b");
        assert_eq!(second.picked, Some(OptionLabel::C));
        assert_eq!(second.picked_text, "c");
    }
}
