//! Question entity

use serde::{Deserialize, Serialize};

/// Where a question in the catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrigin {
    /// Authored by the investor; always asked before any default question
    Custom,
    /// One of the built-in standard questions
    Default,
}

impl QuestionOrigin {
    pub fn is_custom(&self) -> bool {
        matches!(self, QuestionOrigin::Custom)
    }

    /// Tag used when listing the question to the generation collaborator
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionOrigin::Custom => "[CUSTOM]",
            QuestionOrigin::Default => "[default]",
        }
    }
}

/// A scripted question (Entity)
///
/// `asked` is never persisted: it is recomputed from the transcript on
/// every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub origin: QuestionOrigin,
    pub asked: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, origin: QuestionOrigin) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            origin,
            asked: false,
        }
    }

    pub fn custom(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionOrigin::Custom)
    }

    pub fn default_question(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionOrigin::Default)
    }

    pub fn is_custom(&self) -> bool {
        self.origin.is_custom()
    }

    /// Status label used when listing the question to the generation collaborator
    pub fn status_label(&self) -> &'static str {
        if self.asked {
            "(already asked)"
        } else {
            "(not asked yet)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_is_unasked() {
        let q = Question::custom("c1", "What is your moat?");
        assert!(!q.asked);
        assert!(q.is_custom());
        assert_eq!(q.status_label(), "(not asked yet)");
    }

    #[test]
    fn test_origin_tags() {
        assert_eq!(QuestionOrigin::Custom.tag(), "[CUSTOM]");
        assert_eq!(QuestionOrigin::Default.tag(), "[default]");
    }

    #[test]
    fn test_origin_serializes_lowercase() {
        let q = Question::default_question("default-1", "Why now?");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["origin"], "default");
        assert_eq!(json["asked"], false);
    }
}
