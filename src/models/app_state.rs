use super::session::QuizSession;
use crate::flow::FlowState;
use crate::presenter::SubQuizState;

/// Message shown to the respondent on the login screen.
///
/// Held by the [`crate::flow::SessionController`], not by [`AppState`]: a
/// rejected login leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidCredentials,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::InvalidCredentials => "Invalid credentials. Please try again.",
        }
    }
}

/// Single source of truth for one respondent's session.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Mutate it only through [`StateManager::update()`](crate::state::StateManager::update)
/// so change events are emitted. Every session constructs its own manager;
/// nothing here is shared between respondents.
///
/// # Related Types
///
/// - [`crate::state::StateManager`]: Thread-safe wrapper with event emission
/// - [`crate::flow::SessionController`]: The only writer during normal operation
/// - [`crate::presenter::SubQuizState`]: Transient multi-part progress
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Set on successful login, never cleared within the session.
    pub authenticated: bool,

    pub flow: FlowState,

    /// The active quiz. `None` until "generate" and again after "restart".
    pub quiz: Option<QuizSession>,

    /// Present only while a multi-part question is being answered.
    pub sub_quiz: Option<SubQuizState>,
}

impl AppState {
    /// Returns (answered, total, score) for the active quiz, zeros when none.
    pub fn quiz_progress(&self) -> (usize, usize, usize) {
        self.quiz
            .as_ref()
            .map(|q| (q.current_index, q.len(), q.score))
            .unwrap_or((0, 0, 0))
    }

    pub fn is_completed(&self) -> bool {
        self.quiz.as_ref().is_some_and(|q| q.completed)
    }

    /// Drop the question list and any sub-question progress. Authentication is kept.
    pub fn clear_quiz(&mut self) {
        self.quiz = None;
        self.sub_quiz = None;
    }
}
