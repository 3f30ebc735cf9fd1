//! Role-based model configuration.
//!
//! [`ModelConfig`] groups the model selections for the two collaborators.
//! This is a static value object: once created, models don't change at runtime.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// - **Persona**: drives the simulated investor's replies
/// - **Scoring**: produces the final match score once the script is done
///
/// # Example
///
/// ```
/// use interview_domain::config::ModelConfig;
/// use interview_domain::Model;
///
/// let config = ModelConfig::default().with_scoring(Model::Gpt41);
///
/// assert_eq!(config.scoring, Model::Gpt41);
/// assert_eq!(config.persona, Model::Gpt4oMini);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModelConfig {
    /// Model for the persona's conversational replies.
    pub persona: Model,
    /// Model for the completion scoring pass.
    pub scoring: Model,
}

impl ModelConfig {
    pub fn with_persona(mut self, model: Model) -> Self {
        self.persona = model;
        self
    }

    pub fn with_scoring(mut self, model: Model) -> Self {
        self.scoring = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_same_model_for_both_roles() {
        let config = ModelConfig::default();
        assert_eq!(config.persona, config.scoring);
    }

    #[test]
    fn test_builders() {
        let config = ModelConfig::default()
            .with_persona(Model::Gpt4o)
            .with_scoring(Model::Custom("local-judge".to_string()));
        assert_eq!(config.persona, Model::Gpt4o);
        assert_eq!(config.scoring.as_str(), "local-judge");
    }
}
