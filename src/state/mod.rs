// State management module
//
// This module provides the StateManager which wraps one session's AppState with
// thread-safe access using Arc<RwLock<T>> and emits change events for redraws.

use crate::flow::FlowState;
use crate::models::AppState;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events notify interested parties (the GUI, logging, tests) about
/// state changes without requiring them to poll the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The flow driver moved between states
    FlowChanged { from: FlowState, to: FlowState },

    /// The respondent logged in
    Authenticated,

    /// A new quiz replaced the question list
    QuizGenerated { total: usize },

    /// Answered count or score changed
    ProgressUpdated {
        current: usize,
        total: usize,
        score: usize,
    },

    /// A multi-part question moved to another part
    SubQuestionAdvanced { part: usize, parts: usize },

    /// The respondent submitted the test
    QuizCompleted { score: usize, total: usize },

    /// The question list was dropped (restart)
    QuizCleared,
}

/// Thread-safe state manager with event emission
///
/// This is the session-scoped context object that:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// Each call to [`new()`](Self::new) creates an independent session. Clones
/// share the same session; separate respondents must each get their own
/// manager.
///
/// # Related Types
///
/// - [`crate::models::AppState`]: The underlying state structure
/// - [`StateChange`]: Event types emitted on state mutations
/// - [`crate::flow::SessionController`]: Drives all mutations during a session
pub struct StateManager {
    /// The session state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a clone of the current state
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let flow = state_manager.read(|state| state.flow);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// The update function's result and the StateChange events that were emitted
    pub fn update<F, R>(&self, update_fn: F) -> (R, Vec<StateChange>)
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        let result = update_fn(&mut state);

        let changes = Self::detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        (result, changes)
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.flow != new.flow {
            changes.push(StateChange::FlowChanged {
                from: old.flow,
                to: new.flow,
            });
        }

        if !old.authenticated && new.authenticated {
            changes.push(StateChange::Authenticated);
        }

        let old_questions = old.quiz.as_ref().map(|q| &q.questions);
        let new_questions = new.quiz.as_ref().map(|q| &q.questions);
        if old_questions != new_questions || old.quiz.is_some() != new.quiz.is_some() {
            match &new.quiz {
                Some(quiz) => changes.push(StateChange::QuizGenerated { total: quiz.len() }),
                None => changes.push(StateChange::QuizCleared),
            }
        }

        if old.quiz_progress() != new.quiz_progress() {
            let (current, total, score) = new.quiz_progress();
            changes.push(StateChange::ProgressUpdated {
                current,
                total,
                score,
            });
        }

        let old_part = old.sub_quiz.as_ref().and_then(|s| s.current());
        let new_part = new.sub_quiz.as_ref().and_then(|s| s.current());
        if old_part != new_part {
            if let (Some(part), Some(sub)) = (new_part, new.sub_quiz.as_ref()) {
                changes.push(StateChange::SubQuestionAdvanced {
                    part,
                    parts: sub.parts(),
                });
            }
        }

        if !old.is_completed() && new.is_completed() {
            let (_, total, score) = new.quiz_progress();
            changes.push(StateChange::QuizCompleted { score, total });
        }

        changes
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same session
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, OptionLabel, QuestionRecord, QuizSession};
    use crate::presenter::SubQuizState;

    fn quiz(n: usize) -> QuizSession {
        QuizSession::new(
            (0..n)
                .map(|i| {
                    QuestionRecord::simple(
                        format!("q{}", i),
                        Difficulty::Easy,
                        "Q",
                        &["a", "b"],
                        OptionLabel::A,
                    )
                })
                .collect(),
        )
    }

    fn with_quiz(manager: &StateManager, n: usize) -> Vec<StateChange> {
        manager
            .update(|state| {
                state.quiz = Some(quiz(n));
                state.flow = FlowState::InProgress;
            })
            .1
    }

    #[test]
    fn test_new_state_manager() {
        let manager = StateManager::new();
        let state = manager.snapshot();

        assert!(!state.authenticated);
        assert_eq!(state.flow, FlowState::LoggedOut);
        assert!(state.quiz.is_none());
    }

    #[test]
    fn test_authentication_change_detection() {
        let manager = StateManager::new();

        let (_, changes) = manager.update(|state| {
            state.authenticated = true;
            state.flow = FlowState::AwaitingQuizStart;
        });

        assert_eq!(changes.len(), 2);
        assert!(matches!(
            changes[0],
            StateChange::FlowChanged {
                from: FlowState::LoggedOut,
                to: FlowState::AwaitingQuizStart
            }
        ));
        assert_eq!(changes[1], StateChange::Authenticated);
    }

    #[test]
    fn test_quiz_generated_detection() {
        let manager = StateManager::new();

        let changes = with_quiz(&manager, 3);

        assert!(changes.contains(&StateChange::QuizGenerated { total: 3 }));
        assert!(changes.contains(&StateChange::ProgressUpdated {
            current: 0,
            total: 3,
            score: 0
        }));
        assert_eq!(manager.read(|s| s.quiz_progress()), (0, 3, 0));
    }

    #[test]
    fn test_progress_and_completion_events() {
        let manager = StateManager::new();
        with_quiz(&manager, 1);

        let (correct, changes) = manager.update(|state| {
            state
                .quiz
                .as_mut()
                .map(|q| q.submit_answer(0, OptionLabel::A))
        });
        assert_eq!(correct, Some(Ok(true)));
        assert_eq!(
            changes,
            vec![StateChange::ProgressUpdated {
                current: 1,
                total: 1,
                score: 1
            }]
        );

        let (_, changes) = manager.update(|state| {
            if let Some(q) = state.quiz.as_mut() {
                q.mark_completed();
            }
        });
        assert_eq!(changes, vec![StateChange::QuizCompleted { score: 1, total: 1 }]);
    }

    #[test]
    fn test_sub_question_events() {
        let manager = StateManager::new();

        let (_, changes) = manager.update(|state| {
            state.sub_quiz = Some(SubQuizState::new(3));
        });
        assert_eq!(
            changes,
            vec![StateChange::SubQuestionAdvanced { part: 0, parts: 3 }]
        );

        let (_, changes) = manager.update(|state| {
            if let Some(sub) = state.sub_quiz.as_mut() {
                sub.record(OptionLabel::B);
            }
        });
        assert_eq!(
            changes,
            vec![StateChange::SubQuestionAdvanced { part: 1, parts: 3 }]
        );
    }

    #[test]
    fn test_quiz_cleared_detection() {
        let manager = StateManager::new();
        with_quiz(&manager, 2);

        let (_, changes) = manager.update(AppState::clear_quiz);

        assert!(changes.contains(&StateChange::QuizCleared));
        assert!(manager.read(|s| s.quiz.is_none()));
    }

    #[test]
    fn test_unchanged_state_emits_nothing() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        let (_, changes) = manager.update(|state| state.flow = FlowState::LoggedOut);

        assert!(changes.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_subscribe_to_changes() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        manager.update(|state| state.authenticated = true);

        let event = rx.try_recv();
        assert!(matches!(event, Ok(StateChange::Authenticated)));
    }

    #[test]
    fn test_independent_sessions() {
        let first = StateManager::new();
        let second = StateManager::new();

        first.update(|state| state.authenticated = true);

        assert!(first.read(|s| s.authenticated));
        assert!(!second.read(|s| s.authenticated));
    }

    #[test]
    fn test_clone_shares_session() {
        let manager1 = StateManager::new();
        let manager2 = manager1.clone();

        with_quiz(&manager1, 4);

        assert_eq!(manager2.snapshot().quiz_progress(), (0, 4, 0));
    }
}
