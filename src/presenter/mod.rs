//! Question presentation and answer collection.
//!
//! The presenter turns a [`QuestionRecord`] (plus any in-progress multi-part
//! state) into render instructions, and turns a fired choice back into at most
//! one answer label for the quiz. It never touches a display surface.
//!
//! # Multi-part questions
//!
//! A question with sub-questions is answered one part at a time through
//! [`SubQuizState`]:
//!
//! ```text
//! Showing(0) --answer--> Showing(1) --answer--> ... Showing(N-1) --answer--> AllAnswered
//! ```
//!
//! On reaching `AllAnswered` the parts are graded by majority and a single
//! label is synthesized for the parent question, so the quiz scores it exactly
//! like a simple question. The sub-state is then discarded.

pub mod view;

use crate::models::{OptionLabel, QuestionRecord};
use crate::services::grading::{grade_majority, synthesize_answer};

pub use view::{
    ChoiceLayout, ChoiceView, PartView, ProgressView, QuestionView, ResultRow, ResultsView, Screen,
    question_view, results_view,
};

/// Where a multi-part question's answering currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQuizPhase {
    /// Showing the sub-question at this zero-based index.
    Showing(usize),
    AllAnswered,
}

/// Transient progress through one multi-part question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQuizState {
    phase: SubQuizPhase,
    answers: Vec<Option<OptionLabel>>,
}

/// Result of recording one sub-answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubStep {
    /// Moved on to the sub-question at this index.
    Advanced(usize),
    /// The last part was answered.
    AllAnswered,
}

impl SubQuizState {
    /// Enter the machine for a question with `parts` sub-questions.
    pub fn new(parts: usize) -> Self {
        let phase = if parts == 0 {
            SubQuizPhase::AllAnswered
        } else {
            SubQuizPhase::Showing(0)
        };
        Self {
            phase,
            answers: vec![None; parts],
        }
    }

    pub fn phase(&self) -> SubQuizPhase {
        self.phase
    }

    /// Index of the sub-question being shown, if any.
    pub fn current(&self) -> Option<usize> {
        match self.phase {
            SubQuizPhase::Showing(index) => Some(index),
            SubQuizPhase::AllAnswered => None,
        }
    }

    pub fn parts(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &[Option<OptionLabel>] {
        &self.answers
    }

    /// Record the answer for the shown sub-question and step forward.
    ///
    /// Returns `None` when the machine is already in `AllAnswered`.
    pub fn record(&mut self, label: OptionLabel) -> Option<SubStep> {
        let index = self.current()?;
        self.answers[index] = Some(label);

        let step = if index + 1 < self.answers.len() {
            self.phase = SubQuizPhase::Showing(index + 1);
            SubStep::Advanced(index + 1)
        } else {
            self.phase = SubQuizPhase::AllAnswered;
            SubStep::AllAnswered
        };
        Some(step)
    }
}

/// Labels the respondent can pick for this question right now.
///
/// Text layout offers only the provided options; image layout offers a label
/// when it has an image or a text option.
pub fn offered_labels(view: &QuestionView) -> Vec<OptionLabel> {
    view.choices.iter().map(|c| c.label).collect()
}

/// Collect at most one answer for `question` from a fired choice.
///
/// - Simple question: the fired label is the answer.
/// - Multi-part question: the fired label is a sub-answer. Intermediate parts
///   return `None` (the view must be redrawn for the next part); the last part
///   returns the synthesized label and clears `sub_state`.
///
/// `fired == None` means the respondent has not picked anything yet; the
/// sub-state is still entered so the first part can be shown.
pub fn collect(
    question: &QuestionRecord,
    sub_state: &mut Option<SubQuizState>,
    fired: Option<OptionLabel>,
) -> Option<OptionLabel> {
    if !question.is_multipart() {
        return fired;
    }

    let state = sub_state.get_or_insert_with(|| SubQuizState::new(question.subquestions.len()));
    let label = fired?;

    match state.record(label)? {
        SubStep::Advanced(next) => {
            tracing::debug!(
                "Sub-question answered, advancing to part {} of {}",
                next + 1,
                state.parts()
            );
            None
        }
        SubStep::AllAnswered => {
            let outcome = grade_majority(&question.subquestions, state.answers());
            let synthesized = synthesize_answer(question.correct_answer, outcome.passed);
            tracing::debug!(
                "Multi-part question graded: {}/{} correct, passed={}",
                outcome.correct_count,
                outcome.total,
                outcome.passed
            );
            *sub_state = None;
            Some(synthesized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, QuestionOption, SubQuestion};
    use OptionLabel::{A, B, C};

    fn multipart(parent: OptionLabel, parts: &[OptionLabel]) -> QuestionRecord {
        QuestionRecord {
            dir: "q".into(),
            difficulty: Difficulty::Medium,
            question_text: Some("Main".to_string()),
            options: Vec::new(),
            correct_answer: parent,
            subquestions: parts
                .iter()
                .map(|c| SubQuestion {
                    text: None,
                    options: vec![QuestionOption::new("x"), QuestionOption::new("y")],
                    correct_answer: *c,
                })
                .collect(),
        }
    }

    #[test]
    fn test_sub_state_walks_parts() {
        let mut state = SubQuizState::new(2);
        assert_eq!(state.phase(), SubQuizPhase::Showing(0));

        assert_eq!(state.record(A), Some(SubStep::Advanced(1)));
        assert_eq!(state.current(), Some(1));

        assert_eq!(state.record(B), Some(SubStep::AllAnswered));
        assert_eq!(state.phase(), SubQuizPhase::AllAnswered);
        assert_eq!(state.answers(), &[Some(A), Some(B)]);

        assert_eq!(state.record(C), None);
    }

    #[test]
    fn test_collect_simple_passes_through() {
        let question = QuestionRecord::simple("q", Difficulty::Easy, "Q", &["a", "b"], B);
        let mut sub = None;

        assert_eq!(collect(&question, &mut sub, None), None);
        assert_eq!(collect(&question, &mut sub, Some(A)), Some(A));
        assert!(sub.is_none());
    }

    #[test]
    fn test_collect_multipart_majority_pass() {
        let question = multipart(C, &[A, B, A]);
        let mut sub = None;

        assert_eq!(collect(&question, &mut sub, None), None);
        assert_eq!(sub.as_ref().and_then(SubQuizState::current), Some(0));

        assert_eq!(collect(&question, &mut sub, Some(A)), None);
        assert_eq!(collect(&question, &mut sub, Some(B)), None);
        assert_eq!(sub.as_ref().and_then(SubQuizState::current), Some(2));

        assert_eq!(collect(&question, &mut sub, Some(C)), Some(C));
        assert!(sub.is_none());
    }

    #[test]
    fn test_collect_multipart_majority_fail() {
        let question = multipart(A, &[A, B, A]);
        let mut sub = None;

        collect(&question, &mut sub, Some(B));
        collect(&question, &mut sub, Some(A));
        let synthesized = collect(&question, &mut sub, Some(C)).unwrap();

        assert_ne!(synthesized, A);
        assert!(sub.is_none());
    }
}
