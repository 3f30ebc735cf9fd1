//! Invocation and response contract.
//!
//! Wire shapes are camelCase JSON. [`OrchestrationResult`] is the engine's
//! own output; [`InterviewResponse`] adds the caller's conversation id.

use super::catalog::{CustomQuestionInput, QuestionCatalog};
use super::completion::MatchScore;
use super::question::Question;
use super::transcript::ConversationTurn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RESPONDENT_NAME_KEYS: [&str; 5] = ["name", "companyName", "company_name", "startupName", "founderName"];

/// Opaque profiles passed through to the collaborators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaContext {
    pub respondent_profile: Value,
    pub persona_profile: Value,
    pub persona_name: String,
}

impl PersonaContext {
    /// Display name for the persona, falling back to a generic label
    pub fn persona_display_name(&self) -> &str {
        let name = self.persona_name.trim();
        if name.is_empty() { "the investor" } else { name }
    }

    /// Display name for the respondent taken from the first recognised profile field
    pub fn respondent_display_name(&self) -> &str {
        RESPONDENT_NAME_KEYS
            .iter()
            .find_map(|key| {
                self.respondent_profile
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("the founder")
    }
}

/// Caller-supplied question configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionConfig {
    pub custom_questions: Vec<CustomQuestionInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_prompt: Option<String>,
}

/// One engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    /// Newest respondent turn
    pub message: String,
    /// Prior turns, chronological
    #[serde(default)]
    pub chat_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub persona_context: PersonaContext,
    #[serde(default)]
    pub question_config: QuestionConfig,
    pub conversation_id: String,
}

impl InterviewRequest {
    pub fn new(conversation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chat_history: Vec::new(),
            persona_context: PersonaContext::default(),
            question_config: QuestionConfig::default(),
            conversation_id: conversation_id.into(),
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.chat_history = history;
        self
    }

    pub fn with_custom_questions(mut self, questions: Vec<CustomQuestionInput>) -> Self {
        self.question_config.custom_questions = questions;
        self
    }

    pub fn with_behavior_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.question_config.behavior_prompt = Some(prompt.into());
        self
    }

    pub fn with_persona_context(mut self, context: PersonaContext) -> Self {
        self.persona_context = context;
        self
    }
}

/// Result of one engine call (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResult {
    pub reply_text: String,
    pub is_complete: bool,
    pub match_score: Option<f64>,
    pub match_summary: Option<String>,
    /// Ids asked so far including the one asked by `reply_text`, in catalog order
    pub asked_question_ids: Vec<String>,
    /// Questions unasked before this reply; the first is the one being asked now
    pub remaining_questions: Vec<Question>,
    pub custom_asked: usize,
    pub custom_total: usize,
    pub default_asked: usize,
    pub default_total: usize,
}

impl OrchestrationResult {
    /// Assemble the result from the matched catalog.
    ///
    /// `asking` is the question the reply asks, if any. A score is only
    /// attached when `is_complete` holds.
    pub fn new(
        matched: &QuestionCatalog,
        asking: Option<&Question>,
        reply_text: impl Into<String>,
        is_complete: bool,
        score: Option<MatchScore>,
    ) -> Self {
        let is_asked = |q: &Question| q.asked || asking.is_some_and(|a| a.id == q.id);

        let asked_question_ids = matched
            .questions()
            .iter()
            .filter(|&q| is_asked(q))
            .map(|q| q.id.clone())
            .collect();
        let remaining_questions = matched
            .questions()
            .iter()
            .filter(|q| !q.asked)
            .cloned()
            .collect();
        let custom_asked = matched
            .questions()
            .iter()
            .filter(|&q| q.is_custom() && is_asked(q))
            .count();
        let default_asked = matched
            .questions()
            .iter()
            .filter(|&q| !q.is_custom() && is_asked(q))
            .count();

        let (match_score, match_summary) = match score {
            Some(s) if is_complete => (Some(s.score), Some(s.summary)),
            _ => (None, None),
        };

        Self {
            reply_text: reply_text.into(),
            is_complete,
            match_score,
            match_summary,
            asked_question_ids,
            remaining_questions,
            custom_asked,
            custom_total: matched.custom_total(),
            default_asked,
            default_total: matched.default_total(),
        }
    }

    /// Whether the reply asks a scripted question
    pub fn is_question_pending(&self) -> bool {
        !self.remaining_questions.is_empty()
    }

    pub fn into_response(self, conversation_id: impl Into<String>) -> InterviewResponse {
        InterviewResponse {
            is_question_pending: self.is_question_pending(),
            response: self.reply_text,
            match_score: self.match_score,
            match_summary: self.match_summary,
            conversation_id: conversation_id.into(),
            remaining_questions: self.remaining_questions,
            asked_question_ids: self.asked_question_ids,
            custom_asked: self.custom_asked,
            custom_total: self.custom_total,
            default_asked: self.default_asked,
            default_total: self.default_total,
        }
    }
}

/// Response contract returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub response: String,
    pub match_score: Option<f64>,
    pub match_summary: Option<String>,
    pub conversation_id: String,
    pub is_question_pending: bool,
    pub remaining_questions: Vec<Question>,
    pub asked_question_ids: Vec<String>,
    pub custom_asked: usize,
    pub custom_total: usize,
    pub default_asked: usize,
    pub default_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_contract_shape() {
        let request: InterviewRequest = serde_json::from_value(json!({
            "message": "We build payroll for clinics.",
            "chatHistory": [
                { "role": "persona", "text": "What problem are you solving?", "occurredAt": "2026-01-05T09:00:00Z" }
            ],
            "personaContext": {
                "respondentProfile": { "companyName": "Clinipay" },
                "personaProfile": { "focus": "healthtech" },
                "personaName": "Dana"
            },
            "questionConfig": {
                "customQuestions": [ { "question": "Who are your competitors?", "enabled": true } ],
                "behaviorPrompt": "Be direct."
            },
            "conversationId": "conv-1"
        }))
        .unwrap();

        assert_eq!(request.chat_history.len(), 1);
        assert_eq!(request.persona_context.respondent_display_name(), "Clinipay");
        assert_eq!(request.persona_context.persona_display_name(), "Dana");
        assert_eq!(request.question_config.custom_questions.len(), 1);
    }

    #[test]
    fn test_request_minimal() {
        let request: InterviewRequest =
            serde_json::from_value(json!({ "message": "hi", "conversationId": "c" })).unwrap();
        assert!(request.chat_history.is_empty());
        assert_eq!(request.persona_context.respondent_display_name(), "the founder");
        assert_eq!(request.persona_context.persona_display_name(), "the investor");
    }

    #[test]
    fn test_result_counts_include_question_being_asked() {
        let catalog = QuestionCatalog::build(&[
            CustomQuestionInput::new("First custom?"),
            CustomQuestionInput::new("Second custom?"),
        ])
        .catalog;
        let asking = catalog.questions()[0].clone();

        let result =
            OrchestrationResult::new(&catalog, Some(&asking), "First custom?", false, None);

        assert_eq!(result.asked_question_ids, vec!["custom-1"]);
        assert_eq!(result.custom_asked, 1);
        assert_eq!(result.custom_total, 2);
        assert_eq!(result.default_asked, 0);
        assert_eq!(result.default_total, 5);
        assert_eq!(result.remaining_questions[0].id, "custom-1");
        assert!(result.is_question_pending());
    }

    #[test]
    fn test_score_dropped_when_not_complete() {
        let catalog = QuestionCatalog::defaults_only();
        let score = MatchScore {
            score: 80.0,
            summary: "fit".to_string(),
        };
        let result = OrchestrationResult::new(&catalog, None, "ok", false, Some(score));
        assert!(result.match_score.is_none());
        assert!(result.match_summary.is_none());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let catalog = QuestionCatalog::defaults_only();
        let asking = catalog.questions()[0].clone();
        let response = OrchestrationResult::new(&catalog, Some(&asking), &asking.text, false, None)
            .into_response("conv-9");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["conversationId"], "conv-9");
        assert_eq!(json["isQuestionPending"], true);
        assert_eq!(json["matchScore"], Value::Null);
        assert_eq!(json["askedQuestionIds"][0], "default-1");
        assert_eq!(json["defaultTotal"], 5);
    }
}
