use super::{FlowError, FlowEvent, FlowState};
use crate::metrics::Metrics;
use crate::models::{AppState, Notice, OptionLabel, QuizError, TierQuotas};
use crate::presenter::{self, Screen};
use crate::services::assembler::generate_quiz;
use crate::services::auth::CredentialVerifier;
use crate::services::images::FsImageResolver;
use crate::services::repository::QuestionSource;
use crate::state::{StateChange, StateManager};
use std::sync::{Arc, PoisonError, RwLock};

/// Outcome of a user action: the flow state afterwards and whether the
/// presentation layer has to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: FlowState,
    pub redraw: bool,
}

impl Transition {
    fn redraw(state: FlowState) -> Self {
        Self {
            state,
            redraw: true,
        }
    }
}

/// What a fired choice turned into.
enum Selection {
    /// Label not offered by the view on screen.
    Ignored,
    /// Recorded a sub-answer; the next part must be shown.
    SubAnswer,
    Answered { correct: bool, multipart: bool },
}

/// Drives one respondent's session from login to results.
///
/// Every action validates itself against the current [`FlowState`], mutates
/// the session through the [`StateManager`] and reports whether a redraw is
/// needed. Actions that are not legal in the current state return
/// [`FlowError::InvalidAction`] and leave the session untouched.
///
/// All methods take `&self`, so the controller can be shared behind an `Arc`
/// by the GUI callbacks.
pub struct SessionController {
    state: StateManager,
    source: Box<dyn QuestionSource>,
    verifier: Box<dyn CredentialVerifier>,
    images: FsImageResolver,
    quotas: TierQuotas,
    metrics: Arc<Metrics>,
    /// Login screen message; kept apart from the session state.
    notice: RwLock<Option<Notice>>,
}

impl SessionController {
    pub fn new(
        state: StateManager,
        source: impl QuestionSource + 'static,
        verifier: impl CredentialVerifier + 'static,
        quotas: TierQuotas,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            state,
            source: Box::new(source),
            verifier: Box::new(verifier),
            images: FsImageResolver,
            quotas,
            metrics,
            notice: RwLock::new(None),
        }
    }

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn flow(&self) -> FlowState {
        self.state.read(|s| s.flow)
    }

    /// Check credentials and, when accepted, move to the start screen.
    ///
    /// Rejected credentials are not an error: the session state is left as
    /// it was and the login screen shows an "invalid credentials" notice.
    pub fn login(&self, identifier: &str, secret: &str) -> Result<Transition, FlowError> {
        self.ensure_legal(FlowEvent::Authenticated)?;

        let accepted = self.verifier.verify(identifier, secret);
        self.metrics.record_login(accepted);

        if !accepted {
            tracing::warn!("Login rejected for identifier '{}'", identifier);
            self.set_notice(Some(Notice::InvalidCredentials));
            return Ok(Transition::redraw(self.flow()));
        }

        tracing::info!("Login accepted for identifier '{}'", identifier);
        let next = self.apply_event(FlowEvent::Authenticated, |state| {
            state.authenticated = true;
        })?;
        self.set_notice(None);
        Ok(Transition::redraw(next))
    }

    /// Load the bank, assemble a fresh quiz and show its first question.
    pub fn generate(&self) -> Result<Transition, FlowError> {
        // Any question count is legal from the same states.
        self.ensure_legal(FlowEvent::QuizGenerated { questions: 0 })?;

        let bank = self.source.load_questions();
        let quiz = generate_quiz(&bank, &self.quotas);
        let questions = quiz.len();
        if questions == 0 {
            tracing::warn!("Question bank is empty, quiz has no questions");
        }

        let next = self.apply_event(FlowEvent::QuizGenerated { questions }, |state| {
            state.quiz = Some(quiz);
            state.sub_quiz = None;
        })?;
        self.metrics.record_quiz_generated();
        Ok(Transition::redraw(next))
    }

    /// Feed a fired choice to the question on screen.
    ///
    /// Labels the current view does not offer are ignored without a redraw.
    pub fn select(&self, label: OptionLabel) -> Result<Transition, FlowError> {
        let images = &self.images;
        let selection = self.apply(|state| -> Result<Selection, FlowError> {
            if state.flow != FlowState::InProgress {
                return Err(FlowError::InvalidAction {
                    action: "answer",
                    state: state.flow,
                });
            }
            let AppState {
                flow,
                quiz,
                sub_quiz,
                ..
            } = state;
            let Some(quiz) = quiz.as_mut() else {
                return Err(FlowError::InvalidAction {
                    action: "answer",
                    state: *flow,
                });
            };

            let index = quiz.current_index;
            let total = quiz.len();
            let question = quiz
                .questions
                .get(index)
                .ok_or(QuizError::IndexOutOfRange { index, len: total })?;

            let view = presenter::question_view(question, sub_quiz.as_ref(), index, total, images);
            if !presenter::offered_labels(&view).contains(&label) {
                return Ok(Selection::Ignored);
            }

            let multipart = question.is_multipart();
            let Some(answer) = presenter::collect(question, sub_quiz, Some(label)) else {
                return Ok(Selection::SubAnswer);
            };

            let correct = quiz.submit_answer(index, answer)?;
            let remaining = quiz.len() - quiz.current_index;
            *flow = flow.transition(FlowEvent::AnswerRecorded { remaining })?;
            Ok(Selection::Answered { correct, multipart })
        });

        match selection {
            Ok(Selection::Ignored) => {
                tracing::debug!("Ignoring choice {} not offered by the current view", label);
                Ok(Transition {
                    state: self.flow(),
                    redraw: false,
                })
            }
            Ok(Selection::SubAnswer) => {
                self.metrics.record_sub_answer();
                Ok(Transition::redraw(self.flow()))
            }
            Ok(Selection::Answered { correct, multipart }) => {
                if multipart {
                    self.metrics.record_sub_answer();
                }
                self.metrics.record_answer();
                tracing::debug!("Recorded answer {} (correct: {})", label, correct);
                Ok(Transition::redraw(self.flow()))
            }
            Err(err) => {
                tracing::warn!("{}", err);
                Err(err)
            }
        }
    }

    /// Latch the quiz as completed and show the results.
    pub fn submit_test(&self) -> Result<Transition, FlowError> {
        let next = self.apply_event(FlowEvent::TestSubmitted, |state| {
            if let Some(quiz) = state.quiz.as_mut() {
                quiz.mark_completed();
            }
        })?;

        let (score, total, percentage) = self.state.read(|s| {
            s.quiz
                .as_ref()
                .map(|q| (q.score, q.len(), q.percentage()))
                .unwrap_or((0, 0, 0.0))
        });
        tracing::info!(
            "Quiz completed: {} out of {} ({:.2}%)",
            score,
            total,
            percentage
        );
        self.metrics.record_quiz_completed();
        Ok(Transition::redraw(next))
    }

    /// Drop the finished quiz and go back to the start screen.
    pub fn restart(&self) -> Result<Transition, FlowError> {
        let next = self.apply_event(FlowEvent::Restarted, AppState::clear_quiz)?;
        Ok(Transition::redraw(next))
    }

    /// Render model for the current flow state.
    pub fn screen(&self) -> Screen {
        let images = &self.images;
        let notice = *self.notice.read().unwrap_or_else(PoisonError::into_inner);
        self.state.read(|state| match state.flow {
            FlowState::LoggedOut => Screen::Login { notice },
            FlowState::AwaitingQuizStart => Screen::Start,
            FlowState::InProgress => {
                let current = state
                    .quiz
                    .as_ref()
                    .and_then(|quiz| quiz.current_question().map(|question| (quiz, question)));
                match current {
                    Some((quiz, question)) => Screen::Question(presenter::question_view(
                        question,
                        state.sub_quiz.as_ref(),
                        quiz.current_index,
                        quiz.len(),
                        images,
                    )),
                    None => Screen::AwaitingSubmission,
                }
            }
            FlowState::AwaitingSubmission => Screen::AwaitingSubmission,
            FlowState::Completed => match state.quiz.as_ref() {
                Some(quiz) => Screen::Results(presenter::results_view(quiz)),
                None => Screen::Start,
            },
        })
    }

    fn set_notice(&self, notice: Option<Notice>) {
        *self.notice.write().unwrap_or_else(PoisonError::into_inner) = notice;
    }

    /// Reject `event` early when the current state does not accept it.
    fn ensure_legal(&self, event: FlowEvent) -> Result<(), FlowError> {
        self.flow().transition(event).map(|_| ()).inspect_err(|err| {
            tracing::warn!("{}", err);
        })
    }

    /// Mutate the session, count the update and trace flow changes.
    fn apply<F, R>(&self, update_fn: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let (result, changes) = self.state.update(update_fn);
        if !changes.is_empty() {
            self.metrics.record_state_update();
        }
        for change in &changes {
            if let StateChange::FlowChanged { from, to } = change {
                tracing::debug!("Flow: {} -> {}", from, to);
            }
        }
        result
    }

    /// Apply `event` and, only when it is legal, `mutate` in one update.
    fn apply_event<F>(&self, event: FlowEvent, mutate: F) -> Result<FlowState, FlowError>
    where
        F: FnOnce(&mut AppState),
    {
        self.apply(|state| {
            let next = state.flow.transition(event)?;
            mutate(state);
            state.flow = next;
            Ok(next)
        })
        .inspect_err(|err: &FlowError| tracing::warn!("{}", err))
    }
}
