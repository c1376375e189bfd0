//! Quiz and progress engine for StudyPath
//!
//! This crate provides the core quiz-attempt state machine (question
//! sequencing, answer capture, timing, scoring, review generation) and the
//! per-subject progress model. It performs no I/O; the API layer feeds it
//! catalog data and persists whatever it derives.

pub mod attempt;
pub mod progress;

pub use attempt::{
    AnswerOutcome, Attempt, AttemptState, Question, QuestionReview, Quiz, QuizError, ScoreReport,
    Step, grade,
};
pub use progress::SubjectProgress;

/// Percentage of `part` out of `whole`, rounded half-up to an integer 0–100.
///
/// Both quiz scores and subject completion percentages use this rule. A
/// `whole` of zero yields 0 rather than dividing.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
