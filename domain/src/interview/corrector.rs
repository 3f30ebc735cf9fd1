//! Reply correction.
//!
//! The generation collaborator paraphrases, adds extra questions and
//! summarises too early. [`ResponseCorrector`] post-processes its raw reply
//! so that the text sent to the respondent:
//!
//! - contains the mandated question verbatim when one was selected
//! - contains no question at all once the script is exhausted
//!
//! Rules run in order: missing question → extra question → premature
//! summary → question after script.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phrases and canned replies used by [`ResponseCorrector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionPolicy {
    /// Prefixed to a forced question when the conversation is already underway
    pub acknowledgment: String,
    /// Replaces any question the collaborator invents after the script is done
    pub closing: String,
    /// Lowercase markers of a premature wrap-up
    pub summary_markers: Vec<String>,
    /// Lowercase sentence openers that make a sentence a question
    pub interrogative_leads: Vec<String>,
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self {
            acknowledgment: "Thank you for sharing that.".to_string(),
            closing: "Thank you for walking me through all of that. I have everything I need for now and will follow up with you soon.".to_string(),
            summary_markers: [
                "in summary",
                "to summarize",
                "to summarise",
                "to recap",
                "in conclusion",
                "let me summarize",
                "summing up",
                "to sum up",
                "overall, it sounds like",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            interrogative_leads: [
                "what", "how", "why", "when", "where", "who", "which", "could you", "can you",
                "would you", "will you", "do you", "does", "did you", "are you", "is there",
                "have you", "tell me", "walk me through",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl CorrectionPolicy {
    /// Canned phrases must not ask anything themselves: the closing is sent
    /// when no question may be asked, and the acknowledgment precedes one.
    pub fn validate(&self) -> Result<(), DomainError> {
        let checker = ResponseCorrector::new(self.clone());
        for (field, value) in [
            ("acknowledgment", &self.acknowledgment),
            ("closing", &self.closing),
        ] {
            if checker.is_question_like(value) {
                return Err(DomainError::InvalidCorrectionPolicy(format!(
                    "{} must not be a question: {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// A rule that changed the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    /// Mandated question absent; reply replaced by it
    MissingQuestion,
    /// Additional question removed
    ExtraQuestion,
    /// Premature summary replaced by the mandated question
    PrematureSummary,
    /// Question asked after the script ended; replaced by the closing
    QuestionAfterScript,
}

/// Corrected reply plus the rules that fired
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub text: String,
    pub applied: Vec<CorrectionKind>,
}

impl Correction {
    pub fn is_unchanged(&self) -> bool {
        self.applied.is_empty()
    }
}

/// What the reply is required to do on this turn
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequirement<'a> {
    /// Exact text that must appear in the reply
    pub mandated: Option<&'a str>,
    /// Every question in the catalog has been asked
    pub all_asked: bool,
    /// No earlier turns exist
    pub first_turn: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResponseCorrector {
    policy: CorrectionPolicy,
}

impl ResponseCorrector {
    pub fn new(policy: CorrectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CorrectionPolicy {
        &self.policy
    }

    pub fn correct(&self, raw: &str, req: ReplyRequirement<'_>) -> Correction {
        let mut applied = Vec::new();
        let mut text = raw.trim().to_string();

        // 1. Mandated question must be present verbatim
        if let Some(q) = req.mandated
            && !text.contains(q)
        {
            text = self.forced_question(q, req.first_turn);
            applied.push(CorrectionKind::MissingQuestion);
        }

        // 2. At most one question
        if let Some(stripped) = self.strip_extra_questions(&text, req.mandated, req.first_turn) {
            text = stripped;
            applied.push(CorrectionKind::ExtraQuestion);
        }

        // 3. No wrap-up while the script is still running
        if let Some(q) = req.mandated
            && self.has_summary(&text)
        {
            text = q.to_string();
            applied.push(CorrectionKind::PrematureSummary);
        }

        // 4. Nothing to ask once the script is done
        if req.all_asked && (text.is_empty() || self.is_question_like(&text)) {
            text = self.policy.closing.clone();
            applied.push(CorrectionKind::QuestionAfterScript);
        }

        Correction { text, applied }
    }

    /// The mandated question, with an acknowledgment unless this opens the conversation.
    pub fn forced_question(&self, question: &str, first_turn: bool) -> String {
        if first_turn || self.policy.acknowledgment.is_empty() {
            question.to_string()
        } else {
            format!("{} {}", self.policy.acknowledgment, question)
        }
    }

    /// Whether `text` asks something: a `?` or a sentence opening with an
    /// interrogative phrase.
    pub fn is_question_like(&self, text: &str) -> bool {
        if text.contains('?') {
            return true;
        }
        text.split(['.', '!', '\n', ';'])
            .map(|s| s.trim().to_lowercase())
            .any(|sentence| {
                self.policy.interrogative_leads.iter().any(|lead| {
                    sentence == *lead
                        || sentence
                            .strip_prefix(lead.as_str())
                            .is_some_and(|rest| rest.starts_with([' ', ',']))
                })
            })
    }

    fn has_summary(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.policy
            .summary_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
    }

    /// Returns the shortened reply when something had to be removed.
    fn strip_extra_questions(
        &self,
        text: &str,
        mandated: Option<&str>,
        first_turn: bool,
    ) -> Option<String> {
        match mandated.and_then(|q| text.find(q).map(|start| (q, start))) {
            Some((q, start)) => {
                let end = start + q.len();
                if self.is_question_like(&text[..start]) {
                    return Some(self.forced_question(q, first_turn));
                }
                if self.is_question_like(&text[end..]) {
                    return Some(text[..end].trim_end().to_string());
                }
                None
            }
            None => {
                let cut = text.find('?')? + 1;
                if self.is_question_like(&text[cut..]) {
                    Some(text[..cut].trim_end().to_string())
                } else {
                    None
                }
            }
        }
    }
}
