// Session metrics module
//
// Provides lightweight counters for what happened during a quiz session

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Counters are bumped by the session controller and the GUI, and logged
/// as a summary on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Login attempts, successful or not
    pub logins_attempted: AtomicUsize,

    /// Login attempts with unknown credentials
    pub logins_rejected: AtomicUsize,

    /// Quizzes assembled
    pub quizzes_generated: AtomicUsize,

    /// Answers recorded against the quiz (one per question)
    pub answers_recorded: AtomicUsize,

    /// Sub-question answers collected for multi-part questions
    pub sub_answers_recorded: AtomicUsize,

    /// Quizzes submitted for results
    pub quizzes_completed: AtomicUsize,

    /// Number of state updates performed
    pub state_updates: AtomicU64,

    /// Number of full screen redraws
    pub redraws: AtomicU64,

    /// Application start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            logins_attempted: AtomicUsize::new(0),
            logins_rejected: AtomicUsize::new(0),
            quizzes_generated: AtomicUsize::new(0),
            answers_recorded: AtomicUsize::new(0),
            sub_answers_recorded: AtomicUsize::new(0),
            quizzes_completed: AtomicUsize::new(0),
            state_updates: AtomicU64::new(0),
            redraws: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a login attempt
    pub fn record_login(&self, accepted: bool) {
        self.logins_attempted.fetch_add(1, Ordering::Relaxed);
        if !accepted {
            self.logins_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a generated quiz
    pub fn record_quiz_generated(&self) {
        self.quizzes_generated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answer accepted by the quiz
    pub fn record_answer(&self) {
        self.answers_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sub-question answer
    pub fn record_sub_answer(&self) {
        self.sub_answers_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submitted quiz
    pub fn record_quiz_completed(&self) {
        self.quizzes_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a state update
    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a screen redraw
    pub fn record_redraw(&self) {
        self.redraws.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Logins: {} attempted, {} rejected",
            self.logins_attempted.load(Ordering::Relaxed),
            self.logins_rejected.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Quizzes: {} generated, {} completed",
            self.quizzes_generated.load(Ordering::Relaxed),
            self.quizzes_completed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Answers: {} recorded, {} sub-answers",
            self.answers_recorded.load(Ordering::Relaxed),
            self.sub_answers_recorded.load(Ordering::Relaxed)
        );
        tracing::info!(
            "State updates: {}, redraws: {}",
            self.state_updates.load(Ordering::Relaxed),
            self.redraws.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
