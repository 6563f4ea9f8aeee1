use super::question::{OptionLabel, QuestionRecord};
use thiserror::Error;

/// Errors from mutating a [`QuizSession`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Question index {index} is out of range for a quiz of {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One assembled quiz and the respondent's progress through it.
///
/// `answers` runs parallel to `questions`; an unanswered slot is `None`.
/// `current_index` only moves forward, one step per submitted answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub questions: Vec<QuestionRecord>,
    pub answers: Vec<Option<OptionLabel>>,
    pub current_index: usize,
    pub score: usize,
    pub completed: bool,
}

impl QuizSession {
    /// Start a fresh quiz over the given questions: every slot unanswered,
    /// score zero, not completed.
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            current_index: 0,
            score: 0,
            completed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question awaiting an answer, or `None` once every question is answered.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current_index)
    }

    /// True once the index has moved past the last question.
    pub fn all_answered(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// Record an answer and advance.
    ///
    /// Stores `selected` at `answers[index]`, adds one to the score iff it
    /// matches that question's correct answer, and advances the current index
    /// by exactly one. Returns whether the answer was correct.
    ///
    /// Called once per index; guarding against a second submission for the
    /// same index is the flow driver's job.
    pub fn submit_answer(&mut self, index: usize, selected: OptionLabel) -> Result<bool, QuizError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(QuizError::IndexOutOfRange { index, len })?;

        let correct = selected == question.correct_answer;
        self.answers[index] = Some(selected);
        if correct {
            self.score += 1;
        }
        self.current_index += 1;

        tracing::debug!(
            "Answer submitted for question {}/{}: {} ({})",
            index + 1,
            len,
            selected,
            if correct { "correct" } else { "incorrect" }
        );

        Ok(correct)
    }

    /// Latch the completed flag. Never cleared on this session.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Score as a percentage of the question count; 0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.score as f64 / self.questions.len() as f64 * 100.0
    }

    /// Fraction of the quiz already answered, in `[0, 1]`.
    pub fn progress_fraction(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current_index.min(self.questions.len()) as f32) / self.questions.len() as f32
    }

    /// Whether the recorded answer at `index` matches the correct one.
    pub fn is_correct(&self, index: usize) -> bool {
        match (self.answers.get(index), self.questions.get(index)) {
            (Some(Some(answer)), Some(question)) => *answer == question.correct_answer,
            _ => false,
        }
    }
}
