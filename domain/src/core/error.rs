//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Question catalog is empty")]
    EmptyCatalog,

    #[error("Invalid matching policy: {0}")]
    InvalidMatchPolicy(String),

    #[error("Invalid correction policy: {0}")]
    InvalidCorrectionPolicy(String),

    #[error("Scoring reply could not be parsed: {0}")]
    ScoreParse(String),
}

impl DomainError {
    /// Check if this error came from the scoring collaborator's reply
    pub fn is_score_parse(&self) -> bool {
        matches!(self, DomainError::ScoreParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_parse_error_display() {
        let error = DomainError::ScoreParse("missing score".to_string());
        assert_eq!(
            error.to_string(),
            "Scoring reply could not be parsed: missing score"
        );
    }

    #[test]
    fn test_is_score_parse_check() {
        assert!(DomainError::ScoreParse("x".to_string()).is_score_parse());
        assert!(!DomainError::EmptyCatalog.is_score_parse());
        assert!(!DomainError::InvalidMatchPolicy("x".to_string()).is_score_parse());
    }
}
