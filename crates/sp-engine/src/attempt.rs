//! The quiz-attempt state machine.
//!
//! An [`Attempt`] is an explicit owned value: one user session owns one
//! attempt, every operation takes `&mut self`, and the exclusive borrow plus
//! the completed-state check before each mutation give exactly-once
//! completion even when a timer tick races a manual submit.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::percentage;

/// Errors produced by quiz-attempt operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A quiz with zero questions cannot be started.
    #[error("quiz has no questions")]
    EmptyQuiz,
    /// The selected option index is outside the question's option list.
    #[error("option {index} is out of range ({available} options)")]
    InvalidOption { index: usize, available: usize },
    /// The attempt was already submitted; no operation may run again.
    #[error("attempt has already been completed")]
    AlreadyCompleted,
    /// Review data is only available once the attempt is completed.
    #[error("attempt has not been completed yet")]
    NotCompleted,
    /// The question id does not belong to this quiz.
    #[error("question {0} does not belong to this quiz")]
    UnknownQuestion(Uuid),
}

/// A single multiple-choice question.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: Uuid,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`; validated at the catalog boundary.
    pub correct_answer: usize,
    pub explanation: Option<String>,
}

/// A quiz as handed to the engine: title, time limit, ordered questions.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub title: String,
    pub time_limit_minutes: u32,
    pub questions: Vec<Question>,
}

/// Lifecycle state of an attempt. `NotStarted` is the time before the
/// `Attempt` value exists; [`Attempt::start`] is the only entry into
/// `InProgress` and there is no way back out of `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    InProgress,
    Completed,
}

/// Outcome of [`Attempt::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The current question has no recorded answer; position unchanged.
    Stayed,
    /// Moved to the next question.
    Moved,
    /// Was on the last question; advancing submitted the attempt.
    Submitted(ScoreReport),
}

/// Final result of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    /// `round(100 * correct_count / total_questions)`, half-up.
    pub score: u8,
    pub correct_count: usize,
    pub total_questions: usize,
    pub breakdown: Vec<AnswerOutcome>,
}

/// Per-question entry of the score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub question_id: Uuid,
    /// `None` when the question was left unanswered.
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
}

/// Review data for one question of a completed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub is_correct: bool,
    pub correct_answer: usize,
    /// `None` when the question was left unanswered.
    pub selected: Option<usize>,
    pub explanation: Option<&'a str>,
}

/// Score a set of recorded answers against a question list.
///
/// Unanswered questions count as incorrect, never as an error. This is the
/// single scoring rule: [`Attempt::submit`] and the server-side submission
/// path both go through it.
pub fn grade(questions: &[Question], answers: &HashMap<Uuid, usize>) -> ScoreReport {
    let breakdown: Vec<AnswerOutcome> = questions
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id).copied();
            AnswerOutcome {
                question_id: q.id,
                selected,
                correct_answer: q.correct_answer,
                is_correct: selected == Some(q.correct_answer),
            }
        })
        .collect();

    let correct_count = breakdown.iter().filter(|o| o.is_correct).count();

    ScoreReport {
        score: percentage(correct_count, questions.len()),
        correct_count,
        total_questions: questions.len(),
        breakdown,
    }
}

/// One user's run through a quiz.
#[derive(Debug)]
pub struct Attempt {
    quiz: Quiz,
    current: usize,
    answers: HashMap<Uuid, usize>,
    remaining_seconds: u32,
    state: AttemptState,
}

impl Attempt {
    /// Start an attempt: question index 0, no answers, the full time budget.
    ///
    /// Fails with [`QuizError::EmptyQuiz`] when the quiz has zero questions;
    /// the guard lives here, not at submit time.
    pub fn start(quiz: Quiz) -> Result<Self, QuizError> {
        if quiz.questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        let remaining_seconds = quiz.time_limit_minutes * 60;
        Ok(Self {
            quiz,
            current: 0,
            answers: HashMap::new(),
            remaining_seconds,
            state: AttemptState::InProgress,
        })
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Zero-based index of the question the user is currently on.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.quiz.questions[self.current]
    }

    /// The recorded answer for a question, if any.
    pub fn answer(&self, question_id: Uuid) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    /// Record or overwrite the answer for a question (last write wins).
    ///
    /// Fails without touching the answer map when the attempt is completed,
    /// the question id is foreign, or the option index is out of range.
    pub fn select_answer(&mut self, question_id: Uuid, option_index: usize) -> Result<(), QuizError> {
        if self.state == AttemptState::Completed {
            return Err(QuizError::AlreadyCompleted);
        }
        let question = self
            .quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;
        if option_index >= question.options.len() {
            return Err(QuizError::InvalidOption {
                index: option_index,
                available: question.options.len(),
            });
        }
        self.answers.insert(question_id, option_index);
        Ok(())
    }

    /// Move to the next question, but only once the current one is answered.
    ///
    /// On the last question this is equivalent to [`Attempt::submit`].
    pub fn advance(&mut self) -> Result<Step, QuizError> {
        if self.state == AttemptState::Completed {
            return Err(QuizError::AlreadyCompleted);
        }
        let current_id = self.quiz.questions[self.current].id;
        if !self.answers.contains_key(&current_id) {
            return Ok(Step::Stayed);
        }
        if self.current + 1 == self.quiz.questions.len() {
            return self.submit().map(Step::Submitted);
        }
        self.current += 1;
        Ok(Step::Moved)
    }

    /// Move back one question. Always permitted while in progress, regardless
    /// of answer state, and never changes the answer map.
    pub fn retreat(&mut self) -> Result<(), QuizError> {
        if self.state == AttemptState::Completed {
            return Err(QuizError::AlreadyCompleted);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Submit the attempt with whatever answers are recorded.
    ///
    /// Permitted at any time while in progress (early submission). A second
    /// submit is rejected with [`QuizError::AlreadyCompleted`] rather than
    /// silently re-scored: completion side effects are not idempotent.
    pub fn submit(&mut self) -> Result<ScoreReport, QuizError> {
        if self.state == AttemptState::Completed {
            return Err(QuizError::AlreadyCompleted);
        }
        self.state = AttemptState::Completed;
        Ok(grade(&self.quiz.questions, &self.answers))
    }

    /// External 1-second timer tick.
    ///
    /// Decrements the remaining time; at zero the attempt force-submits with
    /// the currently recorded answers and `Ok(Some(report))` is returned. A
    /// tick arriving after completion loses the race and is rejected with
    /// [`QuizError::AlreadyCompleted`].
    pub fn tick(&mut self) -> Result<Option<ScoreReport>, QuizError> {
        if self.state == AttemptState::Completed {
            return Err(QuizError::AlreadyCompleted);
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            return self.submit().map(Some);
        }
        Ok(None)
    }

    /// Review one question of a completed attempt: correctness, the correct
    /// option, the selected option (or unanswered) and the explanation.
    pub fn review_for(&self, question_id: Uuid) -> Result<QuestionReview<'_>, QuizError> {
        if self.state != AttemptState::Completed {
            return Err(QuizError::NotCompleted);
        }
        let question = self
            .quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;
        let selected = self.answers.get(&question_id).copied();
        Ok(QuestionReview {
            is_correct: selected == Some(question.correct_answer),
            correct_answer: question.correct_answer,
            selected,
            explanation: question.explanation.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question {
            id: Uuid::new_v4(),
            prompt: "?".to_string(),
            options: vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_answer: correct,
            explanation: None,
        }
    }

    fn quiz(corrects: &[usize]) -> Quiz {
        Quiz {
            title: "Test quiz".to_string(),
            time_limit_minutes: 1,
            questions: corrects.iter().map(|&c| question(c)).collect(),
        }
    }

    #[test]
    fn test_empty_quiz_cannot_start() {
        let result = Attempt::start(quiz(&[]));
        assert!(matches!(result, Err(QuizError::EmptyQuiz)));
    }

    #[test]
    fn test_all_correct_scores_100() {
        let q = quiz(&[0, 1, 2, 3]);
        let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();
        let mut attempt = Attempt::start(q).unwrap();
        for (i, id) in ids.iter().enumerate() {
            attempt.select_answer(*id, i).unwrap();
        }
        let report = attempt.submit().unwrap();
        assert_eq!(report.score, 100);
        assert_eq!(report.correct_count, 4);
    }

    #[test]
    fn test_none_correct_scores_0() {
        let q = quiz(&[0, 0, 0]);
        let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();
        let mut attempt = Attempt::start(q).unwrap();
        for id in &ids {
            attempt.select_answer(*id, 1).unwrap();
        }
        let report = attempt.submit().unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.correct_count, 0);
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        // Correct answers at [0, 2, 1]; user answers [0, 1, 1].
        let q = quiz(&[0, 2, 1]);
        let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(ids[0], 0).unwrap();
        attempt.select_answer(ids[1], 1).unwrap();
        attempt.select_answer(ids[2], 1).unwrap();
        let report = attempt.submit().unwrap();
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.score, 67);
    }

    #[test]
    fn test_unanswered_questions_count_incorrect() {
        let q = quiz(&[0, 1, 2]);
        let first = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(first, 0).unwrap();
        let report = attempt.submit().unwrap();
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.score, 33);
        assert_eq!(report.breakdown[1].selected, None);
        assert!(!report.breakdown[1].is_correct);
    }

    #[test]
    fn test_double_submit_rejected() {
        let q = quiz(&[0]);
        let mut attempt = Attempt::start(q).unwrap();
        attempt.submit().unwrap();
        assert_eq!(attempt.submit(), Err(QuizError::AlreadyCompleted));
    }

    #[test]
    fn test_select_answer_is_idempotent() {
        let q = quiz(&[2]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(id, 2).unwrap();
        attempt.select_answer(id, 2).unwrap();
        let report = attempt.submit().unwrap();
        assert_eq!(report.correct_count, 1);
    }

    #[test]
    fn test_reselect_overwrites() {
        let q = quiz(&[2]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(id, 0).unwrap();
        attempt.select_answer(id, 2).unwrap();
        assert_eq!(attempt.answer(id), Some(2));
    }

    #[test]
    fn test_out_of_range_option_leaves_state_unchanged() {
        let q = quiz(&[0]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        let result = attempt.select_answer(id, 7);
        assert_eq!(
            result,
            Err(QuizError::InvalidOption {
                index: 7,
                available: 4
            })
        );
        assert_eq!(attempt.answer(id), None);
        assert_eq!(attempt.state(), AttemptState::InProgress);
    }

    #[test]
    fn test_unknown_question_rejected() {
        let q = quiz(&[0]);
        let mut attempt = Attempt::start(q).unwrap();
        let foreign = Uuid::new_v4();
        assert_eq!(
            attempt.select_answer(foreign, 0),
            Err(QuizError::UnknownQuestion(foreign))
        );
    }

    #[test]
    fn test_advance_requires_answer() {
        let q = quiz(&[0, 1]);
        let first = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        assert_eq!(attempt.advance().unwrap(), Step::Stayed);
        assert_eq!(attempt.current_index(), 0);
        attempt.select_answer(first, 0).unwrap();
        assert_eq!(attempt.advance().unwrap(), Step::Moved);
        assert_eq!(attempt.current_index(), 1);
    }

    #[test]
    fn test_advance_on_last_question_submits() {
        let q = quiz(&[0]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(id, 0).unwrap();
        match attempt.advance().unwrap() {
            Step::Submitted(report) => assert_eq!(report.score, 100),
            other => panic!("expected submission, got {other:?}"),
        }
        assert_eq!(attempt.state(), AttemptState::Completed);
    }

    #[test]
    fn test_retreat_always_permitted_and_preserves_answers() {
        let q = quiz(&[0, 1]);
        let first = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        // Retreat on the first question is a no-op.
        attempt.retreat().unwrap();
        assert_eq!(attempt.current_index(), 0);
        attempt.select_answer(first, 0).unwrap();
        attempt.advance().unwrap();
        attempt.retreat().unwrap();
        assert_eq!(attempt.current_index(), 0);
        assert_eq!(attempt.answer(first), Some(0));
    }

    #[test]
    fn test_timer_expiry_forces_submit() {
        // 5 questions, 2 answered correctly before time runs out.
        let q = quiz(&[0, 1, 2, 3, 0]);
        let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();
        let mut attempt = Attempt::start(q).unwrap();
        attempt.select_answer(ids[0], 0).unwrap();
        attempt.select_answer(ids[1], 1).unwrap();

        let mut report = None;
        for _ in 0..60 {
            if let Some(r) = attempt.tick().unwrap() {
                report = Some(r);
                break;
            }
        }
        let report = report.expect("timer should have expired");
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.score, 40);
        assert_eq!(attempt.state(), AttemptState::Completed);

        // The racing manual submit loses.
        assert_eq!(attempt.submit(), Err(QuizError::AlreadyCompleted));
        // And so does a stray late tick.
        assert_eq!(attempt.tick(), Err(QuizError::AlreadyCompleted));
    }

    #[test]
    fn test_review_requires_completion() {
        let q = quiz(&[1]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        assert_eq!(attempt.review_for(id), Err(QuizError::NotCompleted));
        attempt.select_answer(id, 1).unwrap();
        attempt.submit().unwrap();
        let review = attempt.review_for(id).unwrap();
        assert!(review.is_correct);
        assert_eq!(review.correct_answer, 1);
        assert_eq!(review.selected, Some(1));
    }

    #[test]
    fn test_review_of_unanswered_question() {
        let q = quiz(&[1]);
        let id = q.questions[0].id;
        let mut attempt = Attempt::start(q).unwrap();
        attempt.submit().unwrap();
        let review = attempt.review_for(id).unwrap();
        assert!(!review.is_correct);
        assert_eq!(review.selected, None);
    }

    #[test]
    fn test_grade_ignores_nothing_and_scores_everything() {
        let q = quiz(&[0, 1]);
        let ids: Vec<Uuid> = q.questions.iter().map(|q| q.id).collect();
        let mut answers = HashMap::new();
        answers.insert(ids[0], 0);
        let report = grade(&q.questions, &answers);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.score, 50);
    }
}
