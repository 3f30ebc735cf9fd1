//! Question catalog builder.
//!
//! Merges caller-supplied custom questions with the built-in default set
//! into one ordered list: every surviving custom question first, then the
//! defaults. Custom records arrive loosely typed, so each one is classified
//! exactly once into a [`ValidCustomQuestion`] or a [`RejectedEntry`].

use super::question::{Question, QuestionOrigin};
use crate::core::string::normalize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// The standard interview script, asked after all custom questions.
pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "What problem is your startup solving, and who feels that pain most acutely?",
    "How does your product solve this problem differently from existing alternatives?",
    "What traction have you achieved so far in terms of users, revenue, or partnerships?",
    "What is your business model, and how do you plan to scale it?",
    "How much funding are you raising, and how will you use the capital?",
];

/// A custom question record exactly as the caller supplied it
///
/// Fields stay untyped JSON so a malformed record is rejected on its own
/// instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomQuestionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl CustomQuestionInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            id: None,
            question: Some(Value::String(question.into())),
            enabled: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Value::String(id.into()));
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Caller-supplied id as a string, if it is a non-blank string or a number
    fn supplied_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Why a custom record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No `question` field, or it is not a string
    MissingText,
    /// `question` is empty or whitespace only
    BlankText,
    /// `enabled` is explicitly `false`
    Disabled,
    /// Same normalized text as an earlier custom question
    Duplicate,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingText => "missing question text",
            RejectReason::BlankText => "blank question text",
            RejectReason::Disabled => "disabled",
            RejectReason::Duplicate => "duplicate question text",
        }
    }
}

/// A custom record that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Position in the caller's list
    pub index: usize,
    pub reason: RejectReason,
}

/// A custom record that passed validation, id not yet assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCustomQuestion {
    pub supplied_id: Option<String>,
    pub text: String,
}

/// Classify one raw record.
pub fn validate_custom(
    index: usize,
    input: &CustomQuestionInput,
) -> Result<ValidCustomQuestion, RejectedEntry> {
    let reject = |reason| RejectedEntry { index, reason };

    if input.enabled == Some(false) {
        return Err(reject(RejectReason::Disabled));
    }

    let text = match &input.question {
        Some(Value::String(s)) => s.trim(),
        _ => return Err(reject(RejectReason::MissingText)),
    };

    if text.is_empty() {
        return Err(reject(RejectReason::BlankText));
    }

    Ok(ValidCustomQuestion {
        supplied_id: input.supplied_id(),
        text: text.to_string(),
    })
}

/// The merged, ordered question list for one conversation
///
/// Invariant: every custom question precedes every default question, and
/// ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

/// Output of [`QuestionCatalog::build`]
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub catalog: QuestionCatalog,
    pub rejected: Vec<RejectedEntry>,
}

impl QuestionCatalog {
    /// Build the catalog from raw custom records plus [`DEFAULT_QUESTIONS`].
    pub fn build(custom: &[CustomQuestionInput]) -> CatalogBuild {
        Self::build_with_defaults(custom, &DEFAULT_QUESTIONS)
    }

    /// Build the catalog against an explicit default script.
    ///
    /// Question texts are unique after normalization: a custom question
    /// repeating an earlier one is rejected, and a default question already
    /// covered by a custom one is left out. Default ids keep their script
    /// position either way.
    pub fn build_with_defaults(custom: &[CustomQuestionInput], defaults: &[&str]) -> CatalogBuild {
        let mut valid = Vec::new();
        let mut rejected = Vec::new();
        let mut seen_texts: HashSet<String> = HashSet::new();

        for (index, input) in custom.iter().enumerate() {
            match validate_custom(index, input) {
                Ok(v) if !seen_texts.insert(normalize(&v.text)) => rejected.push(RejectedEntry {
                    index,
                    reason: RejectReason::Duplicate,
                }),
                Ok(v) => valid.push(v),
                Err(r) => rejected.push(r),
            }
        }

        let default_ids: Vec<String> = (1..=defaults.len())
            .map(|n| format!("default-{}", n))
            .collect();
        let mut taken: HashSet<String> = default_ids.iter().cloned().collect();

        // Supplied ids win over generated ones; first occurrence keeps it.
        let mut ids: Vec<Option<String>> = Vec::with_capacity(valid.len());
        for v in &valid {
            match &v.supplied_id {
                Some(id) if taken.insert(id.clone()) => ids.push(Some(id.clone())),
                _ => ids.push(None),
            }
        }

        let mut questions = Vec::with_capacity(valid.len() + defaults.len());
        for (position, (v, id)) in valid.into_iter().zip(ids).enumerate() {
            let id = id.unwrap_or_else(|| generate_id(position + 1, &mut taken));
            questions.push(Question::new(id, v.text, QuestionOrigin::Custom));
        }

        for (id, text) in default_ids.into_iter().zip(defaults) {
            if seen_texts.insert(normalize(text)) {
                questions.push(Question::new(id, *text, QuestionOrigin::Default));
            }
        }

        CatalogBuild {
            catalog: Self { questions },
            rejected,
        }
    }

    /// Catalog with default questions only.
    pub fn defaults_only() -> Self {
        Self::build(&[]).catalog
    }

    /// Construct from an already ordered question list.
    ///
    /// Custom questions are stably moved ahead of default ones so the
    /// ordering invariant holds whatever the input order.
    pub fn from_questions(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| !q.is_custom());
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn custom_total(&self) -> usize {
        self.questions.iter().filter(|q| q.is_custom()).count()
    }

    pub fn default_total(&self) -> usize {
        self.len() - self.custom_total()
    }
}

fn generate_id(position: usize, taken: &mut HashSet<String>) -> String {
    let base = format!("custom-{}", position);
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    candidate
}
