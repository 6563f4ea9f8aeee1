//! IQ Quiz - A single-session, tiered multiple-choice quiz
//!
//! Main entry point for the GUI application.
//!
//! # Overview
//!
//! This binary crate provides the Slint GUI frontend. It initializes:
//! - Configuration loading ([`ConfigManager`])
//! - Logging infrastructure (file rotation + console output)
//! - The question bank ([`QuestionRepository`]) and login check ([`StaticCredentials`])
//! - One session ([`SessionController`] over a fresh [`StateManager`])
//! - GUI controller ([`GuiController`] - bridges Slint UI with the session)
//!
//! Everything runs on the main thread. Each action is short (a directory scan
//! at most), so callbacks run synchronously inside the Slint event loop.
//!
//! # Execution Flow
//!
//! 1. Load settings from `config/quiz_settings.yaml` and `QUIZ_*` overrides
//! 2. Initialize logging → logs/iqquiz.<date>
//! 3. Create StateManager and SessionController for this session
//! 4. Create GuiController (wires Slint UI to the session)
//! 5. Run Slint event loop (blocks until window closed)
//! 6. Log the session metrics summary
//!
//! # Question Bank
//!
//! Expected under `questions/` (configurable via `questions_dir`):
//! - `easy/`, `medium/`, `hard/`: one sub-directory per question
//! - each question directory holds `config.json` and optional images

use anyhow::Result;
use iqquiz::models::QuizSettings;
use iqquiz::services::{QuestionRepository, StaticCredentials};
use iqquiz::ui::GuiController;
use iqquiz::{APP_NAME, ConfigManager, Metrics, SessionController, StateManager, VERSION};
use std::sync::Arc;

/// Main entry point for the quiz GUI application
///
/// # Errors
///
/// This function can fail if:
/// - The config directory cannot be created or the settings file is invalid YAML
/// - Logging initialization fails (disk space, permissions)
/// - Slint UI initialization fails (graphics drivers, display)
/// - GUI encounters a fatal error during execution
fn main() -> Result<()> {
    let config_manager = ConfigManager::new("config")?;
    let settings = config_manager.load_settings()?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = iqquiz::logging::setup_from_settings(&settings)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    log_settings(&settings);

    let metrics = Arc::new(Metrics::new());
    let repository =
        QuestionRepository::new(settings.questions_dir.as_str(), settings.definition_file.as_str());
    let credentials = StaticCredentials::new(settings.credentials.clone());

    let session = Arc::new(SessionController::new(
        StateManager::new(),
        repository,
        credentials,
        settings.quotas,
        Arc::clone(&metrics),
    ));
    tracing::info!("Session initialized");

    let gui_controller = GuiController::new(session, &settings.title)?;

    tracing::info!("GUI controller initialized, launching window");

    // Run the GUI (blocks until window is closed)
    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");
    metrics.log_summary();

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}

fn log_settings(settings: &QuizSettings) {
    tracing::info!(
        "Question bank: {} (definition file: {})",
        settings.questions_dir,
        settings.definition_file
    );
    tracing::info!(
        "Quotas: easy={}, medium={}, hard={}; {} accepted credential(s)",
        settings.quotas.easy,
        settings.quotas.medium,
        settings.quotas.hard,
        settings.credentials.len()
    );
}
