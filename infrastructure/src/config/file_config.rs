//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use crate::openai::gateway::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, OpenAiSettings};
use interview_application::{InterviewParams, MatchingStrategy};
use interview_domain::interview::CorrectionPolicy;
use interview_domain::{DomainError, MatchPolicy, Model, ModelConfig, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("word_overlap_threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("unsupported generation provider: {0}")]
    UnsupportedProvider(String),

    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("invalid [matching] section: {0}")]
    InvalidMatching(DomainError),

    #[error("invalid [correction] section: {0}")]
    InvalidCorrection(DomainError),
}

/// Raw generation configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Only "openai" (any OpenAI-compatible endpoint) is supported
    pub provider: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key; prefer `api_key_env`
    pub api_key: Option<String>,
    /// Model for the persona replies
    pub persona_model: Model,
    /// Model for the match scoring pass
    pub scoring_model: Model,
    pub temperature: f32,
    /// Timeout in seconds for each collaborator call
    pub timeout_seconds: Option<u64>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            persona_model: Model::default(),
            scoring_model: Model::default(),
            temperature: 0.7,
            timeout_seconds: Some(60),
        }
    }
}

/// Transcript matching strategy as written in TOML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMatchingStrategy {
    #[default]
    Fuzzy,
    Exact,
}

/// Raw matching configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMatchingConfig {
    pub strategy: FileMatchingStrategy,
    pub word_overlap_threshold: f64,
    pub min_significant_word_len: usize,
    pub substring_match: bool,
}

impl Default for FileMatchingConfig {
    fn default() -> Self {
        let policy = MatchPolicy::default();
        Self {
            strategy: FileMatchingStrategy::default(),
            word_overlap_threshold: policy.word_overlap_threshold,
            min_significant_word_len: policy.min_significant_word_len,
            substring_match: policy.substring_match,
        }
    }
}

impl FileMatchingConfig {
    pub fn to_strategy(&self) -> MatchingStrategy {
        match self.strategy {
            FileMatchingStrategy::Exact => MatchingStrategy::Exact,
            FileMatchingStrategy::Fuzzy => MatchingStrategy::Fuzzy(
                MatchPolicy::default()
                    .with_word_overlap_threshold(self.word_overlap_threshold)
                    .with_min_significant_word_len(self.min_significant_word_len)
                    .with_substring_match(self.substring_match),
            ),
        }
    }
}

/// Raw correction phrases from TOML; unset fields keep the built-in wording
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorrectionConfig {
    /// Prefix put in front of a forced question
    pub acknowledgment: Option<String>,
    /// Reply used once every question has been asked
    pub closing: Option<String>,
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation log path; empty disables
    pub conversation_log: Option<String>,
    /// tracing file sink; empty disables
    pub file: Option<String>,
}

impl FileLoggingConfig {
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        non_blank_path(self.conversation_log.as_deref())
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        non_blank_path(self.file.as_deref())
    }
}

fn non_blank_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generation: FileGenerationConfig,
    pub matching: FileMatchingConfig,
    pub correction: FileCorrectionConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.generation.provider.eq_ignore_ascii_case("openai") {
            return Err(ConfigValidationError::UnsupportedProvider(
                self.generation.provider.clone(),
            ));
        }

        if self.generation.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.generation.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for model in [&self.generation.persona_model, &self.generation.scoring_model] {
            if model.as_str().trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
        }

        let threshold = self.matching.word_overlap_threshold;
        if self.matching.strategy == FileMatchingStrategy::Fuzzy
            && !(threshold > 0.0 && threshold <= 1.0)
        {
            return Err(ConfigValidationError::InvalidThreshold(threshold));
        }

        let params = self.to_interview_params();
        params
            .matching
            .validate()
            .map_err(ConfigValidationError::InvalidMatching)?;
        params
            .correction
            .validate()
            .map_err(ConfigValidationError::InvalidCorrection)?;

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.generation.timeout_seconds.map(Duration::from_secs)
    }

    /// Parameters for the interview use case
    pub fn to_interview_params(&self) -> InterviewParams {
        let models = ModelConfig::default()
            .with_persona(self.generation.persona_model.clone())
            .with_scoring(self.generation.scoring_model.clone());

        let mut correction = CorrectionPolicy::default();
        if let Some(ack) = &self.correction.acknowledgment {
            correction.acknowledgment = ack.trim().to_string();
        }
        if let Some(closing) = self.correction.closing.as_deref().map(str::trim)
            && !closing.is_empty()
        {
            correction.closing = closing.to_string();
        }

        InterviewParams::default()
            .with_models(models)
            .with_matching(self.matching.to_strategy())
            .with_correction(correction)
            .with_collaborator_timeout(self.timeout())
    }

    /// Connection settings for the HTTP adapter
    pub fn to_openai_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.generation.base_url.trim().to_string(),
            api_key: self.generation.api_key.clone(),
            api_key_env: self.generation.api_key_env.clone(),
            temperature: self.generation.temperature,
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generation]
provider = "openai"
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"
persona_model = "gpt-4.1"
scoring_model = "gpt-5"
temperature = 0.3
timeout_seconds = 120

[matching]
strategy = "exact"

[correction]
acknowledgment = "Got it."

[logging]
conversation_log = "/tmp/interview.jsonl"

[output]
format = "text"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.base_url, "http://localhost:11434/v1");
        assert_eq!(config.generation.persona_model, Model::Gpt41);
        assert_eq!(config.generation.scoring_model, Model::Gpt5);
        assert_eq!(config.generation.timeout_seconds, Some(120));
        assert_eq!(config.matching.strategy, FileMatchingStrategy::Exact);
        assert_eq!(config.correction.acknowledgment.as_deref(), Some("Got it."));
        assert_eq!(
            config.logging.conversation_log_path(),
            Some(PathBuf::from("/tmp/interview.jsonl"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Text));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
persona_model = "my-finetune"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.generation.persona_model,
            Model::Custom("my-finetune".to_string())
        );
        // Defaults should apply
        assert_eq!(config.generation.scoring_model, Model::default());
        assert_eq!(config.generation.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.matching.strategy, FileMatchingStrategy::Fuzzy);
        assert!(config.logging.conversation_log_path().is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[generation]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[generation]
scoring_model = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_threshold_range() {
        let toml_str = r#"
[matching]
word_overlap_threshold = 1.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_validate_min_significant_word_len() {
        let config: FileConfig =
            toml::from_str("[matching]\nmin_significant_word_len = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMatching(
                DomainError::InvalidMatchPolicy(_)
            ))
        ));

        let exact: FileConfig =
            toml::from_str("[matching]\nstrategy = \"exact\"\nmin_significant_word_len = 0")
                .unwrap();
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_validate_question_like_closing() {
        let toml_str = r#"
[correction]
closing = "Is there anything else you want to share?"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidCorrection(_))
        ));
    }

    #[test]
    fn test_validate_unsupported_provider() {
        let toml_str = r#"
[generation]
provider = "carrier-pigeon"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_to_interview_params() {
        let toml_str = r#"
[generation]
persona_model = "gpt-4o"
timeout_seconds = 15

[matching]
word_overlap_threshold = 0.5
min_significant_word_len = 5

[correction]
closing = "Thanks, we'll be in touch."
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.to_interview_params();

        assert_eq!(params.models.persona, Model::Gpt4o);
        assert_eq!(params.collaborator_timeout, Some(Duration::from_secs(15)));
        assert_eq!(params.correction.closing, "Thanks, we'll be in touch.");
        match params.matching {
            MatchingStrategy::Fuzzy(policy) => {
                assert_eq!(policy.word_overlap_threshold, 0.5);
                assert_eq!(policy.min_significant_word_len, 5);
                assert!(policy.substring_match);
            }
            MatchingStrategy::Exact => panic!("expected fuzzy strategy"),
        }
    }

    #[test]
    fn test_to_openai_settings() {
        let mut config = FileConfig::default();
        config.generation.api_key = Some("sk-inline".to_string());
        let settings = config.to_openai_settings();

        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.resolve_api_key().as_deref(), Some("sk-inline"));
        assert_eq!(settings.timeout, Some(Duration::from_secs(60)));
    }
}
