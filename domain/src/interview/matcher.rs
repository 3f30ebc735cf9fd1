//! Transcript matching.
//!
//! Reconstructs which questions have already been asked by comparing each
//! persona turn against the catalog. Matching is recomputed from an all-unasked
//! state on every call, so the same `(catalog, transcript)` pair always yields
//! the same flags.
//!
//! # Rules
//!
//! For each persona turn, in chronological order, the still-unmatched
//! questions are scanned in catalog order; the first question that matches
//! is marked asked and the scan stops for that turn.
//!
//! | Rule | [`FuzzyMatcher`] | [`ExactMatcher`] |
//! |------|------------------|------------------|
//! | Exact text (case-insensitive, trimmed) | yes | yes |
//! | Question text contained in the turn | yes (configurable) | no |
//! | Significant-word overlap ≥ threshold | yes | no |

use super::catalog::QuestionCatalog;
use super::transcript::ConversationTurn;
use crate::core::error::DomainError;
use crate::core::string::{normalize, significant_words};
use serde::{Deserialize, Serialize};

/// Thresholds for fuzzy matching
///
/// These are empirical heuristics. Short questions with few significant
/// words reach the overlap threshold easily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Fraction of a question's significant words that must appear in the turn
    pub word_overlap_threshold: f64,
    /// Minimum character count for a word to be significant
    pub min_significant_word_len: usize,
    /// Whether containment of the full question text counts as a match
    pub substring_match: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            word_overlap_threshold: 0.7,
            min_significant_word_len: 4,
            substring_match: true,
        }
    }
}

impl MatchPolicy {
    pub fn with_word_overlap_threshold(mut self, threshold: f64) -> Self {
        self.word_overlap_threshold = threshold;
        self
    }

    pub fn with_min_significant_word_len(mut self, len: usize) -> Self {
        self.min_significant_word_len = len;
        self
    }

    pub fn with_substring_match(mut self, enabled: bool) -> Self {
        self.substring_match = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.word_overlap_threshold > 0.0 && self.word_overlap_threshold <= 1.0) {
            return Err(DomainError::InvalidMatchPolicy(format!(
                "word_overlap_threshold must be in (0, 1], got {}",
                self.word_overlap_threshold
            )));
        }
        if self.min_significant_word_len == 0 {
            return Err(DomainError::InvalidMatchPolicy(
                "min_significant_word_len cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Strategy deciding whether a persona turn asked a given question
pub trait QuestionMatcher: Send + Sync {
    fn matches(&self, turn_text: &str, question_text: &str) -> bool;
}

/// Exact-text matching only
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl QuestionMatcher for ExactMatcher {
    fn matches(&self, turn_text: &str, question_text: &str) -> bool {
        normalize(turn_text) == normalize(question_text)
    }
}

/// Exact, substring and word-overlap matching
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    policy: MatchPolicy,
}

impl FuzzyMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Fraction of the question's significant words found in the turn, or
    /// `None` when the question has no significant words.
    pub fn word_overlap(&self, turn_text: &str, question_text: &str) -> Option<f64> {
        let words = significant_words(question_text, self.policy.min_significant_word_len);
        if words.is_empty() {
            return None;
        }
        let turn = normalize(turn_text);
        let found = words.iter().filter(|w| turn.contains(w.as_str())).count();
        Some(found as f64 / words.len() as f64)
    }
}

impl QuestionMatcher for FuzzyMatcher {
    fn matches(&self, turn_text: &str, question_text: &str) -> bool {
        let turn = normalize(turn_text);
        let question = normalize(question_text);
        if question.is_empty() {
            return false;
        }

        if turn == question {
            return true;
        }

        if self.policy.substring_match && turn.contains(&question) {
            return true;
        }

        self.word_overlap(turn_text, question_text)
            .is_some_and(|ratio| ratio >= self.policy.word_overlap_threshold)
    }
}

/// Result of matching a transcript against a catalog
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Fresh catalog with `asked` flags set
    pub catalog: QuestionCatalog,
    /// `(index into history, question id)` for each turn that matched
    pub matches: Vec<(usize, String)>,
    /// Whether default-question matches were undone because no custom question matched
    pub guard_applied: bool,
}

/// Recompute `asked` flags for `catalog` from `history`.
///
/// Flags already present on `catalog` are ignored.
pub fn match_transcript(
    catalog: &QuestionCatalog,
    history: &[ConversationTurn],
    matcher: &dyn QuestionMatcher,
) -> MatchReport {
    let mut questions = catalog.questions().to_vec();
    for q in questions.iter_mut() {
        q.asked = false;
    }

    let mut matches = Vec::new();
    for (turn_index, turn) in history.iter().enumerate() {
        if !turn.is_persona() {
            continue;
        }
        if let Some(q) = questions
            .iter_mut()
            .find(|q| !q.asked && matcher.matches(&turn.text, &q.text))
        {
            q.asked = true;
            matches.push((turn_index, q.id.clone()));
        }
    }

    // A default match while no custom question matched is treated as a
    // false positive, otherwise custom questions could be skipped entirely.
    let has_custom = questions.iter().any(|q| q.is_custom());
    let any_custom_asked = questions.iter().any(|q| q.is_custom() && q.asked);
    let mut guard_applied = false;
    if has_custom && !any_custom_asked {
        for q in questions.iter_mut().filter(|q| !q.is_custom() && q.asked) {
            q.asked = false;
            guard_applied = true;
        }
        if guard_applied {
            matches.clear();
        }
    }

    MatchReport {
        catalog: QuestionCatalog::from_questions(questions),
        matches,
        guard_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::catalog::{CustomQuestionInput, DEFAULT_QUESTIONS};

    fn asked_ids(report: &MatchReport) -> Vec<String> {
        report
            .catalog
            .questions()
            .iter()
            .filter(|q| q.asked)
            .map(|q| q.id.clone())
            .collect()
    }

    // ==================== Matcher strategy tests ====================

    #[test]
    fn test_exact_match_ignores_case_and_padding() {
        let m = FuzzyMatcher::default();
        assert!(m.matches("  WHAT IS YOUR MOAT?  ", "What is your moat?"));
        assert!(ExactMatcher.matches("what is your moat?", "What is your moat?"));
    }

    #[test]
    fn test_substring_match() {
        let m = FuzzyMatcher::default();
        assert!(m.matches(
            "Thanks for that. What is your moat? Take your time.",
            "What is your moat?"
        ));
        assert!(!ExactMatcher.matches(
            "Thanks for that. What is your moat?",
            "What is your moat?"
        ));

        let no_substring = FuzzyMatcher::new(MatchPolicy::default().with_substring_match(false));
        // Still matches through word overlap
        assert!(no_substring.matches("Thanks. What is your moat?", "What is your moat?"));
    }

    #[test]
    fn test_word_overlap_threshold() {
        let m = FuzzyMatcher::default();
        let question = "How do you plan to acquire your first thousand customers?";
        // significant: plan, acquire, your, first, thousand, customers -> 6
        let paraphrase = "Could you walk me through your plan to acquire the first thousand customers";
        assert!(m.matches(paraphrase, question));

        let unrelated = "Tell me about your plan for hiring";
        let ratio = m.word_overlap(unrelated, question).unwrap();
        assert!(ratio < 0.7);
        assert!(!m.matches(unrelated, question));
    }

    #[test]
    fn test_question_without_significant_words_needs_exact_or_substring() {
        let m = FuzzyMatcher::default();
        assert_eq!(m.word_overlap("anything", "Why?"), None);
        assert!(!m.matches("anything at all", "Why?"));
        assert!(m.matches("why?", "Why?"));
    }

    #[test]
    fn test_policy_validation() {
        assert!(MatchPolicy::default().validate().is_ok());
        assert!(
            MatchPolicy::default()
                .with_word_overlap_threshold(0.0)
                .validate()
                .is_err()
        );
        assert!(
            MatchPolicy::default()
                .with_word_overlap_threshold(1.5)
                .validate()
                .is_err()
        );
        assert!(
            MatchPolicy::default()
                .with_min_significant_word_len(0)
                .validate()
                .is_err()
        );
    }

    // ==================== match_transcript tests ====================

    #[test]
    fn test_one_turn_marks_at_most_one_question() {
        let catalog = QuestionCatalog::defaults_only();
        // Contains two questions verbatim; only the first in catalog order counts
        let turn = format!("{} {}", DEFAULT_QUESTIONS[1], DEFAULT_QUESTIONS[0]);
        let history = vec![ConversationTurn::persona(turn)];

        let report = match_transcript(&catalog, &history, &FuzzyMatcher::default());
        assert_eq!(asked_ids(&report), vec!["default-1"]);
        assert_eq!(report.matches, vec![(0, "default-1".to_string())]);
    }

    #[test]
    fn test_respondent_turns_are_ignored() {
        let catalog = QuestionCatalog::defaults_only();
        let history = vec![ConversationTurn::respondent(DEFAULT_QUESTIONS[0])];
        let report = match_transcript(&catalog, &history, &FuzzyMatcher::default());
        assert!(asked_ids(&report).is_empty());
    }

    #[test]
    fn test_stale_flags_are_discarded() {
        let mut questions = QuestionCatalog::defaults_only().into_questions();
        for q in questions.iter_mut() {
            q.asked = true;
        }
        let stale = QuestionCatalog::from_questions(questions);

        let report = match_transcript(&stale, &[], &FuzzyMatcher::default());
        assert!(asked_ids(&report).is_empty());
    }

    #[test]
    fn test_matching_is_deterministic() {
        let catalog = QuestionCatalog::build(&[CustomQuestionInput::new(
            "What does your go-to-market strategy look like?",
        )])
        .catalog;
        let history = vec![
            ConversationTurn::persona("What does your go-to-market strategy look like?"),
            ConversationTurn::respondent("Direct sales."),
            ConversationTurn::persona(DEFAULT_QUESTIONS[0]),
        ];
        let matcher = FuzzyMatcher::default();
        let a = match_transcript(&catalog, &history, &matcher);
        let b = match_transcript(&a.catalog, &history, &matcher);
        assert_eq!(a.catalog, b.catalog);
        assert_eq!(asked_ids(&a), vec!["custom-1", "default-1"]);
    }

    #[test]
    fn test_guard_undoes_default_matches_when_no_custom_asked() {
        let catalog = QuestionCatalog::build(&[CustomQuestionInput::new(
            "Which regulatory approvals do you still need?",
        )])
        .catalog;
        let history = vec![ConversationTurn::persona(DEFAULT_QUESTIONS[0])];

        let report = match_transcript(&catalog, &history, &FuzzyMatcher::default());
        assert!(report.guard_applied);
        assert!(asked_ids(&report).is_empty());
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_guard_not_applied_without_custom_questions() {
        let catalog = QuestionCatalog::defaults_only();
        let history = vec![ConversationTurn::persona(DEFAULT_QUESTIONS[0])];
        let report = match_transcript(&catalog, &history, &FuzzyMatcher::default());
        assert!(!report.guard_applied);
        assert_eq!(asked_ids(&report), vec!["default-1"]);
    }

    #[test]
    fn test_question_is_never_matched_twice() {
        let catalog = QuestionCatalog::defaults_only();
        let history = vec![
            ConversationTurn::persona(DEFAULT_QUESTIONS[0]),
            ConversationTurn::respondent("We help clinics."),
            ConversationTurn::persona(DEFAULT_QUESTIONS[0]),
        ];
        let report = match_transcript(&catalog, &history, &FuzzyMatcher::default());
        assert_eq!(report.matches.len(), 1);
    }
}
