//! Session flow: the top-level state machine and the controller that drives it.
//!
//! ```text
//!  LoggedOut --Authenticated--> AwaitingQuizStart --QuizGenerated--> InProgress
//!                                      ^                                 |
//!                                      |                     AnswerRecorded (last)
//!                                  Restarted                             v
//!                                      |                       AwaitingSubmission
//!                                  Completed <------TestSubmitted--------+
//! ```
//!
//! [`FlowState::transition`] is pure; [`SessionController`] performs the side
//! effects (loading questions, scoring) and applies the resulting state.

pub mod controller;

pub use controller::{SessionController, Transition};

use crate::models::QuizError;
use std::fmt;
use thiserror::Error;

/// Where the session is in the login → quiz → results cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowState {
    #[default]
    LoggedOut,
    AwaitingQuizStart,
    InProgress,
    AwaitingSubmission,
    Completed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::LoggedOut => "logged out",
            FlowState::AwaitingQuizStart => "awaiting quiz start",
            FlowState::InProgress => "in progress",
            FlowState::AwaitingSubmission => "awaiting submission",
            FlowState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Something that happened which may move the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Authenticated,
    /// A quiz was assembled with this many questions.
    QuizGenerated { questions: usize },
    /// An answer was recorded; `remaining` questions are still unanswered.
    AnswerRecorded { remaining: usize },
    TestSubmitted,
    Restarted,
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            FlowEvent::Authenticated => "authenticate",
            FlowEvent::QuizGenerated { .. } => "generate",
            FlowEvent::AnswerRecorded { .. } => "answer",
            FlowEvent::TestSubmitted => "submit test",
            FlowEvent::Restarted => "restart",
        }
    }
}

/// Errors from driving the session flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot {action} while {state}")]
    InvalidAction {
        action: &'static str,
        state: FlowState,
    },

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl FlowState {
    /// Apply an event, returning the next state or the rejected action.
    pub fn transition(self, event: FlowEvent) -> Result<FlowState, FlowError> {
        use FlowEvent::*;
        use FlowState::*;

        let next = match (self, event) {
            (LoggedOut, Authenticated) => AwaitingQuizStart,
            (AwaitingQuizStart, QuizGenerated { questions: 0 }) => AwaitingSubmission,
            (AwaitingQuizStart, QuizGenerated { .. }) => InProgress,
            (InProgress, AnswerRecorded { remaining: 0 }) => AwaitingSubmission,
            (InProgress, AnswerRecorded { .. }) => InProgress,
            (AwaitingSubmission, TestSubmitted) => Completed,
            (Completed, Restarted) => AwaitingQuizStart,
            (state, event) => {
                return Err(FlowError::InvalidAction {
                    action: event.name(),
                    state,
                });
            }
        };

        Ok(next)
    }

    /// Whether the respondent has logged in.
    pub fn is_authenticated(self) -> bool {
        self != FlowState::LoggedOut
    }
}
