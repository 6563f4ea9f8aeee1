// IQ Quiz - A single-session, tiered multiple-choice quiz
//
// This is the library crate containing the quiz logic, session state and flow.
// The binary crate (main.rs) provides the GUI entry point.

pub mod config;
pub mod flow;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod presenter;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use flow::{FlowError, FlowState, SessionController, Transition};
pub use metrics::Metrics;
pub use models::{AppState, QuizSession, QuizSettings};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
