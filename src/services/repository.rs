//! Question bank loading.
//!
//! The bank is a directory with one sub-directory per tier:
//!
//! ```text
//! questions/
//! ├── easy/
//! │   ├── question1/
//! │   │   ├── config.json
//! │   │   ├── question.png
//! │   │   └── option_a.jpg
//! │   └── question2/config.json
//! ├── medium/
//! └── hard/
//! ```
//!
//! Anything that cannot become a question (no definition file, unreadable or
//! malformed definition, missing tier directory) simply contributes zero
//! questions. Loading never fails.

use crate::models::{Difficulty, QuestionDefinition, QuestionError, QuestionRecord};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;

/// Questions available per tier, in tier order (easy, medium, hard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    tiers: IndexMap<Difficulty, Vec<QuestionRecord>>,
}

impl QuestionBank {
    /// A bank with every tier present and empty.
    pub fn empty() -> Self {
        let tiers = Difficulty::ALL.iter().map(|d| (*d, Vec::new())).collect();
        Self { tiers }
    }

    pub fn insert_tier(&mut self, difficulty: Difficulty, questions: Vec<QuestionRecord>) {
        self.tiers.insert(difficulty, questions);
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[QuestionRecord] {
        self.tiers.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn counts(&self) -> IndexMap<Difficulty, usize> {
        self.tiers.iter().map(|(d, qs)| (*d, qs.len())).collect()
    }

    pub fn total(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::empty()
    }
}

/// Anything that can produce a snapshot of the question bank.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionSource: Send + Sync {
    fn load_questions(&self) -> QuestionBank;
}

/// Reads question definitions from a tiered directory tree.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    root: Utf8PathBuf,
    definition_file: String,
}

impl QuestionRepository {
    pub fn new(root: impl Into<Utf8PathBuf>, definition_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            definition_file: definition_file.into(),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Load every tier. Entries are visited in file-name order so repeated
    /// loads of an unchanged tree return identical banks.
    pub fn load_questions(&self) -> QuestionBank {
        let mut bank = QuestionBank::empty();

        for difficulty in Difficulty::ALL {
            let questions = self.load_tier(difficulty);
            tracing::info!(
                "Loaded {} {} question(s) from {}",
                questions.len(),
                difficulty,
                self.root.join(difficulty.dir_name())
            );
            bank.insert_tier(difficulty, questions);
        }

        bank
    }

    fn load_tier(&self, difficulty: Difficulty) -> Vec<QuestionRecord> {
        let tier_dir = self.root.join(difficulty.dir_name());

        let entries = match tier_dir.read_dir_utf8() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Tier directory {} not readable: {}", tier_dir, e);
                return Vec::new();
            }
        };

        let mut question_dirs: Vec<Utf8PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_dir())
            .collect();
        question_dirs.sort();

        question_dirs
            .into_iter()
            .filter_map(|dir| {
                let definition = dir.join(&self.definition_file);
                if !definition.is_file() {
                    tracing::debug!("Skipping {}: no {}", dir, self.definition_file);
                    return None;
                }

                match parse_definition(&definition) {
                    Ok(def) => Some(def.into_record(dir, difficulty)),
                    Err(e) => {
                        tracing::warn!("Skipping malformed question: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

impl QuestionSource for QuestionRepository {
    fn load_questions(&self) -> QuestionBank {
        QuestionRepository::load_questions(self)
    }
}

/// Parse one definition file. YAML when the extension says so, JSON otherwise.
pub fn parse_definition(path: &Utf8Path) -> Result<QuestionDefinition, QuestionError> {
    let contents = fs::read_to_string(path).map_err(|source| QuestionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension() {
        Some("yaml") | Some("yml") => {
            serde_yaml_ng::from_str(&contents).map_err(|source| QuestionError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => serde_json::from_str(&contents).map_err(|source| QuestionError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionLabel;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    fn write_question(root: &Utf8Path, tier: &str, name: &str, body: &str) {
        let dir = root.join(tier).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.json"), body).unwrap();
    }

    #[test]
    fn test_missing_root_yields_empty_bank() {
        let repo = QuestionRepository::new("/definitely/not/here", "config.json");
        let bank = repo.load_questions();

        assert_eq!(bank.total(), 0);
        assert!(bank.tier(Difficulty::Medium).is_empty());
    }

    #[test]
    fn test_loads_and_tags_questions() {
        let (_guard, root) = temp_root();
        write_question(&root, "easy", "q1", r#"{"question_text": "One", "options": [{"text": "x"}], "correct_answer": "A"}"#);
        write_question(&root, "hard", "q9", r#"{"correct_answer": "D"}"#);

        let bank = QuestionRepository::new(&root, "config.json").load_questions();

        let easy = bank.tier(Difficulty::Easy);
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].difficulty, Difficulty::Easy);
        assert_eq!(easy[0].dir, root.join("easy").join("q1"));
        assert_eq!(bank.tier(Difficulty::Hard)[0].correct_answer, OptionLabel::D);
        assert_eq!(bank.total(), 2);
    }

    #[test]
    fn test_skips_malformed_and_missing_definitions() {
        let (_guard, root) = temp_root();
        write_question(&root, "medium", "good", r#"{"correct_answer": "B"}"#);
        write_question(&root, "medium", "broken", "{ not json");
        write_question(&root, "medium", "bad_label", r#"{"correct_answer": "Z"}"#);
        fs::create_dir_all(root.join("medium").join("empty")).unwrap();
        fs::write(root.join("medium").join("stray.txt"), "not a dir").unwrap();

        let bank = QuestionRepository::new(&root, "config.json").load_questions();

        assert_eq!(bank.tier(Difficulty::Medium).len(), 1);
        assert_eq!(bank.counts()[&Difficulty::Easy], 0);
    }

    #[test]
    fn test_loading_is_order_stable() {
        let (_guard, root) = temp_root();
        for name in ["c", "a", "b"] {
            write_question(&root, "easy", name, r#"{"correct_answer": "A"}"#);
        }
        let repo = QuestionRepository::new(&root, "config.json");

        let first = repo.load_questions();
        let second = repo.load_questions();

        assert_eq!(first, second);
        let names: Vec<_> = first
            .tier(Difficulty::Easy)
            .iter()
            .map(|q| q.dir.file_name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_yaml_definition() {
        let (_guard, root) = temp_root();
        let dir = root.join("easy").join("y1");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("question.yaml"),
            "question_text: Pick one\noptions:\n  - text: left\n  - text: right\ncorrect_answer: B\n",
        )
        .unwrap();

        let bank = QuestionRepository::new(&root, "question.yaml").load_questions();

        let easy = bank.tier(Difficulty::Easy);
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].option_text(OptionLabel::B), Some("right"));
    }

    #[test]
    fn test_parse_definition_reports_path() {
        let (_guard, root) = temp_root();
        let path = root.join("bad.json");
        fs::write(&path, "[]").unwrap();

        let err = parse_definition(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
