use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Difficulty tier a question is sampled from.
///
/// The serialized form doubles as the tier's directory name under the
/// question bank root (`easy/`, `medium/`, `hard/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in sampling order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Directory name of this tier under the question bank root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One of the four fixed choice labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    /// Lowercase form used in image file names (`option_a.png`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            OptionLabel::A => "a",
            OptionLabel::B => "b",
            OptionLabel::C => "c",
            OptionLabel::D => "d",
        }
    }

    /// Position of the label in the A-D set.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a label as emitted by the UI layer ("A".."D", case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "A" | "a" => Some(OptionLabel::A),
            "B" | "b" => Some(OptionLabel::B),
            "C" | "c" => Some(OptionLabel::C),
            "D" | "d" => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A textual answer option.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(default)]
    pub text: String,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One part of a multi-part question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubQuestion {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub correct_answer: OptionLabel,
}

/// On-disk shape of a question definition file.
///
/// Source path and tier are not part of the file; they come from where the
/// file was found and are attached by [`QuestionDefinition::into_record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDefinition {
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub correct_answer: OptionLabel,
    #[serde(default)]
    pub subquestions: Vec<SubQuestion>,
}

impl QuestionDefinition {
    pub fn into_record(self, dir: Utf8PathBuf, difficulty: Difficulty) -> QuestionRecord {
        QuestionRecord {
            dir,
            difficulty,
            question_text: self.question_text,
            options: self.options,
            correct_answer: self.correct_answer,
            subquestions: self.subquestions,
        }
    }
}

/// Errors raised while reading a single question definition.
#[derive(Error, Debug)]
pub enum QuestionError {
    #[error("Failed to read question definition {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON question definition {path}: {source}")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML question definition {path}: {source}")]
    Yaml {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// A question loaded from the bank, simple or multi-part.
///
/// A multi-part question still carries a top-level `correct_answer`; it is the
/// label synthesized as the recorded answer when the parts pass by majority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Source directory; also the question's identity and the base for image lookup.
    pub dir: Utf8PathBuf,
    pub difficulty: Difficulty,
    pub question_text: Option<String>,
    pub options: Vec<QuestionOption>,
    pub correct_answer: OptionLabel,
    pub subquestions: Vec<SubQuestion>,
}

impl QuestionRecord {
    /// Build a simple text question. Mostly useful for tests and fixtures.
    pub fn simple(
        dir: impl Into<Utf8PathBuf>,
        difficulty: Difficulty,
        text: impl Into<String>,
        options: &[&str],
        correct_answer: OptionLabel,
    ) -> Self {
        Self {
            dir: dir.into(),
            difficulty,
            question_text: Some(text.into()),
            options: options.iter().map(|o| QuestionOption::new(*o)).collect(),
            correct_answer,
            subquestions: Vec::new(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        !self.subquestions.is_empty()
    }

    pub fn id(&self) -> &Utf8Path {
        &self.dir
    }

    /// Text option for a label, if the record provides one.
    pub fn option_text(&self, label: OptionLabel) -> Option<&str> {
        self.options.get(label.index()).map(|o| o.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_parses_simple_question() {
        let json = r#"{
            "question_text": "Which shape comes next?",
            "options": [{"text": "Circle"}, {"text": "Square"}, {"text": "Star"}],
            "correct_answer": "C"
        }"#;

        let def: QuestionDefinition = serde_json::from_str(json).unwrap();
        let record = def.into_record(Utf8PathBuf::from("questions/easy/q1"), Difficulty::Easy);

        assert!(!record.is_multipart());
        assert_eq!(record.options.len(), 3);
        assert_eq!(record.correct_answer, OptionLabel::C);
        assert_eq!(record.option_text(OptionLabel::B), Some("Square"));
        assert_eq!(record.option_text(OptionLabel::D), None);
    }

    #[test]
    fn test_definition_parses_multipart_question() {
        let json = r#"{
            "question_text": "Read the passage",
            "correct_answer": "A",
            "subquestions": [
                {"text": "Part one", "options": [{"text": "x"}, {"text": "y"}], "correct_answer": "B"},
                {"options": [{"text": "x"}, {"text": "y"}], "correct_answer": "A"}
            ]
        }"#;

        let def: QuestionDefinition = serde_json::from_str(json).unwrap();
        let record = def.into_record(Utf8PathBuf::from("q"), Difficulty::Hard);

        assert!(record.is_multipart());
        assert_eq!(record.subquestions.len(), 2);
        assert_eq!(record.subquestions[1].text, None);
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_definition_rejects_unknown_label() {
        let json = r#"{"correct_answer": "E"}"#;
        assert!(serde_json::from_str::<QuestionDefinition>(json).is_err());
    }

    #[test]
    fn test_option_label_parse() {
        assert_eq!(OptionLabel::parse("a"), Some(OptionLabel::A));
        assert_eq!(OptionLabel::parse(" D "), Some(OptionLabel::D));
        assert_eq!(OptionLabel::parse("E"), None);
        assert_eq!(OptionLabel::from_index(2), Some(OptionLabel::C));
        assert_eq!(OptionLabel::from_index(4), None);
    }

    #[test]
    fn test_difficulty_dir_names() {
        let names: Vec<_> = Difficulty::ALL.iter().map(|d| d.dir_name()).collect();
        assert_eq!(names, vec!["easy", "medium", "hard"]);
    }
}
