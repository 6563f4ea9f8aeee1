// GUI Controller - Bridges the Slint UI with the quiz session
//
// This module contains the GuiController which coordinates between:
// - Slint UI (MainWindow)
// - SessionController (flow driver and session state)
//
// It handles:
// - Routing UI callbacks to session actions
// - Redrawing the window from SessionController::screen() after a transition

use crate::flow::{FlowError, SessionController, Transition};
use crate::models::OptionLabel;
use crate::presenter::{ChoiceLayout, ChoiceView, QuestionView, ResultRow, ResultsView, Screen};
use anyhow::{Context, Result};
use camino::Utf8Path;
use slint::{ModelRc, SharedString, VecModel};
use std::sync::Arc;

// Include the generated Slint code
slint::include_modules!();

/// GUI Controller that wires up the Slint UI with the quiz session
///
/// Every callback runs a [`SessionController`] action synchronously on the UI
/// thread and redraws the whole window when the resulting [`Transition`]
/// asks for it. Nothing here holds quiz state of its own.
///
/// # Example
/// ```ignore
/// let session = Arc::new(SessionController::new(state, repository, credentials, quotas, metrics));
/// let controller = GuiController::new(session, "IQ Test")?;
/// controller.run()?;  // Blocks until window is closed
/// ```
pub struct GuiController {
    /// The Slint UI window
    ui: MainWindow,

    /// The session driven by this window
    session: Arc<SessionController>,
}

impl GuiController {
    /// Create a new GUI controller
    ///
    /// # Arguments
    /// * `session` - The session this window drives
    /// * `title` - Window and page title
    ///
    /// # Returns
    /// A new GuiController ready to run
    pub fn new(session: Arc<SessionController>, title: &str) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;
        ui.set_app_title(title.into());

        Self::setup_callbacks(&ui, &session);
        Self::render(&ui, &session);

        tracing::info!("GUI controller initialized");

        Ok(Self { ui, session })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        let result = self.ui.run();
        tracing::debug!("GUI event loop ended in state: {}", self.session.flow());
        result
    }

    /// Set up all UI callbacks
    fn setup_callbacks(ui: &MainWindow, session: &Arc<SessionController>) {
        let controller = Arc::clone(session);
        let ui_weak = ui.as_weak();

        ui.on_login(move |identifier, secret| {
            let result = controller.login(identifier.as_str(), secret.as_str());
            Self::after_action(&ui_weak, &controller, result);
        });

        let controller = Arc::clone(session);
        let ui_weak = ui.as_weak();

        ui.on_generate(move || {
            tracing::info!("Generate requested");
            let result = controller.generate();
            Self::after_action(&ui_weak, &controller, result);
        });

        let controller = Arc::clone(session);
        let ui_weak = ui.as_weak();

        ui.on_select_option(move |label| {
            let Some(label) = OptionLabel::parse(label.as_str()) else {
                tracing::warn!("Ignoring unknown option label '{}'", label);
                return;
            };
            let result = controller.select(label);
            Self::after_action(&ui_weak, &controller, result);
        });

        let controller = Arc::clone(session);
        let ui_weak = ui.as_weak();

        ui.on_submit_test(move || {
            let result = controller.submit_test();
            Self::after_action(&ui_weak, &controller, result);
        });

        let controller = Arc::clone(session);
        let ui_weak = ui.as_weak();

        ui.on_restart(move || {
            let result = controller.restart();
            Self::after_action(&ui_weak, &controller, result);
        });

        tracing::debug!("UI callbacks configured");
    }

    /// Redraw if the action asked for it. Rejected actions were already
    /// logged by the session and leave the window as it is.
    fn after_action(
        ui_weak: &slint::Weak<MainWindow>,
        session: &SessionController,
        result: Result<Transition, FlowError>,
    ) {
        match result {
            Ok(transition) if transition.redraw => {
                if let Some(ui) = ui_weak.upgrade() {
                    Self::render(&ui, session);
                }
            }
            Ok(_) => {}
            Err(err) => tracing::debug!("Action not applied: {}", err),
        }
    }

    /// Redraw the whole window from the session's current screen
    fn render(ui: &MainWindow, session: &SessionController) {
        let screen = session.screen();
        session.metrics().record_redraw();

        ui.set_screen(screen_kind(&screen));

        match &screen {
            Screen::Login { notice } => {
                ui.set_notice(notice.map(|n| n.message()).unwrap_or_default().into());
            }
            Screen::Question(view) => Self::render_question(ui, view),
            Screen::Results(results) => Self::render_results(ui, results),
            Screen::Start | Screen::AwaitingSubmission => {}
        }
    }

    fn render_question(ui: &MainWindow, view: &QuestionView) {
        ui.set_progress_caption(view.progress.caption().into());
        ui.set_progress_fraction(view.progress.fraction);
        ui.set_heading(view.heading.clone().unwrap_or_default().into());

        let question_image = view.question_image.as_deref().and_then(load_image);
        ui.set_has_question_image(question_image.is_some());
        ui.set_question_image(question_image.unwrap_or_default());

        match &view.part {
            Some(part) => {
                ui.set_part_caption(part.caption().into());
                ui.set_part_text(part.text.clone().unwrap_or_default().into());
                let part_image = part.image.as_deref().and_then(load_image);
                ui.set_has_part_image(part_image.is_some());
                ui.set_part_image(part_image.unwrap_or_default());
            }
            None => {
                ui.set_part_caption(SharedString::new());
                ui.set_part_text(SharedString::new());
                ui.set_has_part_image(false);
                ui.set_part_image(slint::Image::default());
            }
        }

        ui.set_image_layout(view.layout == ChoiceLayout::Image);
        ui.set_choices(ModelRc::new(VecModel::from(choice_items(&view.choices))));
    }

    fn render_results(ui: &MainWindow, results: &ResultsView) {
        ui.set_score_line(results.score_line().into());
        ui.set_percentage_line(results.percentage_line().into());
        ui.set_results(ModelRc::new(VecModel::from(result_items(&results.rows))));
    }
}

/// Which panel shows a given screen.
fn screen_kind(screen: &Screen) -> ScreenKind {
    match screen {
        Screen::Login { .. } => ScreenKind::Login,
        Screen::Start => ScreenKind::Start,
        Screen::Question(_) => ScreenKind::Question,
        Screen::AwaitingSubmission => ScreenKind::AwaitingSubmission,
        Screen::Results(_) => ScreenKind::Results,
    }
}

fn choice_items(choices: &[ChoiceView]) -> Vec<ChoiceItem> {
    choices
        .iter()
        .map(|choice| {
            let picture = choice.image.as_deref().and_then(load_image);
            ChoiceItem {
                label: choice.label.as_str().into(),
                text: choice.text.clone().unwrap_or_default().into(),
                has_picture: picture.is_some(),
                picture: picture.unwrap_or_default(),
            }
        })
        .collect()
}

fn result_items(rows: &[ResultRow]) -> Vec<ResultItem> {
    rows.iter()
        .map(|row| ResultItem {
            title: format!("Question {}: {}", row.number, row.title).into(),
            verdict: row.verdict().into(),
            correct: row.correct,
            correction: row.correction().unwrap_or_default().into(),
        })
        .collect()
}

/// Load an image for display; a file that cannot be decoded omits the slot.
fn load_image(path: &Utf8Path) -> Option<slint::Image> {
    match slint::Image::load_from_path(path.as_std_path()) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::warn!("Failed to load image {}: {:?}", path, err);
            None
        }
    }
}
