//! Interview parameters for use case control.
//!
//! [`InterviewParams`] groups the static parameters that control
//! [`RunInterviewUseCase`](crate::use_cases::run_interview::RunInterviewUseCase).
//! They are set once at startup and shared by every call.

use interview_domain::interview::{
    CorrectionPolicy, ExactMatcher, FuzzyMatcher, MatchPolicy, QuestionMatcher,
};
use interview_domain::{DomainError, ModelConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which transcript matcher to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum MatchingStrategy {
    /// Exact, substring and word-overlap matching
    Fuzzy(MatchPolicy),
    /// Exact text only
    Exact,
}

impl Default for MatchingStrategy {
    fn default() -> Self {
        Self::Fuzzy(MatchPolicy::default())
    }
}

impl MatchingStrategy {
    pub fn matcher(&self) -> Box<dyn QuestionMatcher> {
        match self {
            MatchingStrategy::Fuzzy(policy) => Box::new(FuzzyMatcher::new(policy.clone())),
            MatchingStrategy::Exact => Box::new(ExactMatcher),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            MatchingStrategy::Fuzzy(policy) => policy.validate(),
            MatchingStrategy::Exact => Ok(()),
        }
    }
}

/// Orchestration control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewParams {
    /// Models for the persona and scoring collaborators.
    pub models: ModelConfig,
    /// Transcript matching strategy.
    pub matching: MatchingStrategy,
    /// Canned phrases for reply correction.
    pub correction: CorrectionPolicy,
    /// Upper bound for each collaborator call; `None` waits indefinitely.
    pub collaborator_timeout: Option<Duration>,
}

impl Default for InterviewParams {
    fn default() -> Self {
        Self {
            models: ModelConfig::default(),
            matching: MatchingStrategy::default(),
            correction: CorrectionPolicy::default(),
            collaborator_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl InterviewParams {
    // ==================== Builder Methods ====================

    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    pub fn with_matching(mut self, matching: MatchingStrategy) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_correction(mut self, correction: CorrectionPolicy) -> Self {
        self.correction = correction;
        self
    }

    pub fn with_collaborator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.collaborator_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = InterviewParams::default();
        assert_eq!(params.matching, MatchingStrategy::Fuzzy(MatchPolicy::default()));
        assert_eq!(params.collaborator_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builder_methods() {
        let params = InterviewParams::default()
            .with_matching(MatchingStrategy::Exact)
            .with_collaborator_timeout(None);
        assert_eq!(params.matching, MatchingStrategy::Exact);
        assert!(params.collaborator_timeout.is_none());
    }

    #[test]
    fn test_exact_strategy_rejects_paraphrase() {
        let matcher = MatchingStrategy::Exact.matcher();
        assert!(matcher.matches("What is your moat?", "what is your moat?"));
        assert!(!matcher.matches("So, what is your moat?", "What is your moat?"));
    }

    #[test]
    fn test_strategy_validation() {
        let bad = MatchingStrategy::Fuzzy(MatchPolicy::default().with_word_overlap_threshold(2.0));
        assert!(bad.validate().is_err());
        assert!(MatchingStrategy::Exact.validate().is_ok());
    }
}
