use super::SubQuizState;
use crate::models::{Notice, OptionLabel, QuestionOption, QuestionRecord, QuizSession};
use crate::services::images::{ImageResolver, ImageSlot};
use camino::Utf8PathBuf;

/// What the presentation layer should draw for the current flow state.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login { notice: Option<Notice> },
    Start,
    Question(QuestionView),
    AwaitingSubmission,
    Results(ResultsView),
}

/// Quiz-level progress shown above every question.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Zero-based index of the question on screen.
    pub index: usize,
    pub total: usize,
    /// Answered fraction, `index / total`.
    pub fraction: f32,
}

impl ProgressView {
    pub fn caption(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }
}

/// Header for the active part of a multi-part question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartView {
    /// One-based part number.
    pub number: usize,
    pub total: usize,
    pub text: Option<String>,
    pub image: Option<Utf8PathBuf>,
}

impl PartView {
    pub fn caption(&self) -> String {
        format!("Part {} of {}", self.number, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceLayout {
    /// One row per text option.
    Text,
    /// Side-by-side image cards, falling back to text for labels without an image.
    Image,
}

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: OptionLabel,
    pub text: Option<String>,
    pub image: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub progress: ProgressView,
    pub heading: Option<String>,
    pub question_image: Option<Utf8PathBuf>,
    pub part: Option<PartView>,
    pub layout: ChoiceLayout,
    pub choices: Vec<ChoiceView>,
}

/// Build the render instructions for `question`, the `index`-th of `total`.
///
/// For a multi-part question the part shown is the one `sub_state` points
/// at, or the first part when no sub-state exists yet.
pub fn question_view<R: ImageResolver + ?Sized>(
    question: &QuestionRecord,
    sub_state: Option<&SubQuizState>,
    index: usize,
    total: usize,
    resolver: &R,
) -> QuestionView {
    let progress = ProgressView {
        index,
        total,
        fraction: if total == 0 {
            0.0
        } else {
            index as f32 / total as f32
        },
    };

    let text = question
        .question_text
        .as_deref()
        .filter(|t| !t.is_empty());
    let question_image = resolver.resolve(&question.dir, ImageSlot::Question);

    if !question.is_multipart() {
        let (layout, choices) = build_choices(&question.options, |label| {
            resolver.resolve(&question.dir, ImageSlot::Option(label))
        });

        return QuestionView {
            progress,
            heading: text.map(str::to_string),
            question_image,
            part: None,
            layout,
            choices,
        };
    }

    let parts = question.subquestions.len();
    let part_index = sub_state
        .and_then(SubQuizState::current)
        .unwrap_or(0)
        .min(parts - 1);
    let sub = &question.subquestions[part_index];

    let (layout, choices) = build_choices(&sub.options, |label| {
        resolver.resolve(&question.dir, ImageSlot::SubOption(part_index, label))
    });

    QuestionView {
        progress,
        heading: text.map(|t| format!("Main Question: {}", t)),
        question_image,
        part: Some(PartView {
            number: part_index + 1,
            total: parts,
            text: sub.text.clone().filter(|t| !t.is_empty()),
            image: resolver.resolve(&question.dir, ImageSlot::SubQuestion(part_index)),
        }),
        layout,
        choices,
    }
}

fn build_choices<F>(options: &[QuestionOption], image_for: F) -> (ChoiceLayout, Vec<ChoiceView>)
where
    F: Fn(OptionLabel) -> Option<Utf8PathBuf>,
{
    let images: Vec<_> = OptionLabel::ALL.iter().map(|l| image_for(*l)).collect();
    let text_for = |label: OptionLabel| options.get(label.index()).map(|o| o.text.clone());

    if images.iter().any(Option::is_some) {
        let choices = OptionLabel::ALL
            .iter()
            .zip(images)
            .filter_map(|(label, image)| {
                let text = text_for(*label);
                (image.is_some() || text.is_some()).then_some(ChoiceView {
                    label: *label,
                    text,
                    image,
                })
            })
            .collect();
        (ChoiceLayout::Image, choices)
    } else {
        let choices = OptionLabel::ALL
            .iter()
            .take(options.len())
            .map(|label| ChoiceView {
                label: *label,
                text: text_for(*label),
                image: None,
            })
            .collect();
        (ChoiceLayout::Text, choices)
    }
}

/// One line of the results breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// One-based question number.
    pub number: usize,
    pub title: String,
    pub correct: bool,
    pub given: Option<OptionLabel>,
    pub expected: OptionLabel,
}

impl ResultRow {
    pub fn verdict(&self) -> &'static str {
        if self.correct { "✓ Correct" } else { "✗ Incorrect" }
    }

    /// "Your answer: X, Correct answer: Y" for incorrect rows.
    pub fn correction(&self) -> Option<String> {
        if self.correct {
            return None;
        }
        let given = self.given.map(OptionLabel::as_str).unwrap_or("-");
        Some(format!(
            "Your answer: {}, Correct answer: {}",
            given, self.expected
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub rows: Vec<ResultRow>,
}

impl ResultsView {
    pub fn score_line(&self) -> String {
        format!("Your score: {} out of {}", self.score, self.total)
    }

    pub fn percentage_line(&self) -> String {
        format!("Percentage: {:.2}%", self.percentage)
    }
}

/// Score summary and per-question breakdown for a finished quiz.
pub fn results_view(session: &QuizSession) -> ResultsView {
    let rows = session
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let number = i + 1;
            let title = match question.question_text.as_deref() {
                None => format!("Question {}", number),
                Some("") => format!("Question {} (Image)", number),
                Some(text) => text.to_string(),
            };
            ResultRow {
                number,
                title,
                correct: session.is_correct(i),
                given: session.answers.get(i).copied().flatten(),
                expected: question.correct_answer,
            }
        })
        .collect();

    ResultsView {
        score: session.score,
        total: session.len(),
        percentage: session.percentage(),
        rows,
    }
}
