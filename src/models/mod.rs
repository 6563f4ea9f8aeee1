//! Data models for the quiz application.
//!
//! - [`QuestionRecord`]: One question from the bank, simple or multi-part
//! - [`QuizSession`]: An assembled quiz with answers, position, score and completion latch
//! - [`AppState`]: The per-session state container managed by [`StateManager`](crate::state::StateManager)
//! - [`QuizSettings`]: Settings loaded from `quiz_settings.yaml`

pub mod app_state;
pub mod config;
pub mod question;
pub mod session;

pub use app_state::{AppState, Notice};
pub use config::{QuizSettings, TierQuotas};
pub use question::{
    Difficulty, OptionLabel, QuestionDefinition, QuestionError, QuestionOption, QuestionRecord,
    SubQuestion,
};
pub use session::{QuizError, QuizSession};
