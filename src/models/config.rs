use super::question::Difficulty;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How many questions to draw from each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierQuotas {
    #[serde(default = "default_easy_quota")]
    pub easy: usize,

    #[serde(default = "default_medium_quota")]
    pub medium: usize,

    #[serde(default = "default_hard_quota")]
    pub hard: usize,
}

impl TierQuotas {
    pub fn for_tier(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Upper bound on quiz length.
    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl Default for TierQuotas {
    fn default() -> Self {
        Self {
            easy: default_easy_quota(),
            medium: default_medium_quota(),
            hard: default_hard_quota(),
        }
    }
}

fn default_easy_quota() -> usize {
    3
}

fn default_medium_quota() -> usize {
    4
}

fn default_hard_quota() -> usize {
    3
}

/// Application settings from `quiz_settings.yaml` plus `QUIZ_*` overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Root of the question bank; holds the `easy/`, `medium/`, `hard/` tiers.
    pub questions_dir: String,

    /// Definition file looked for in each question directory.
    pub definition_file: String,

    pub quotas: TierQuotas,

    /// Accepted (identifier, secret) pairs. A placeholder, not an identity provider.
    pub credentials: IndexMap<String, String>,

    pub title: String,

    pub log_dir: String,

    pub debug_mode: bool,

    pub console_logging: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        let mut credentials = IndexMap::new();
        credentials.insert("0".to_string(), "0".to_string());

        Self {
            questions_dir: "questions".to_string(),
            definition_file: "config.json".to_string(),
            quotas: TierQuotas::default(),
            credentials,
            title: "IQ Test".to_string(),
            log_dir: "logs".to_string(),
            debug_mode: false,
            console_logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_defaults() {
        let quotas = TierQuotas::default();
        assert_eq!(quotas.for_tier(Difficulty::Easy), 3);
        assert_eq!(quotas.for_tier(Difficulty::Medium), 4);
        assert_eq!(quotas.for_tier(Difficulty::Hard), 3);
        assert_eq!(quotas.total(), 10);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = QuizSettings::default();
        assert_eq!(settings.questions_dir, "questions");
        assert_eq!(settings.definition_file, "config.json");
        assert_eq!(settings.credentials.get("0").map(String::as_str), Some("0"));
        assert!(!settings.debug_mode);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "questions_dir: bank\nquotas:\n  medium: 2\n";
        let settings: QuizSettings = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(settings.questions_dir, "bank");
        assert_eq!(settings.quotas.easy, 3);
        assert_eq!(settings.quotas.medium, 2);
        assert_eq!(settings.title, "IQ Test");
    }
}
