//! Prompt templates for the scoring pass

use crate::interview::contract::PersonaContext;
use crate::interview::transcript::{ConversationTurn, TurnRole};

/// Templates for the scoring collaborator
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for scoring
    pub fn scoring_system() -> &'static str {
        r#"You are an experienced venture analyst.
You assess how well a startup matches an investor's thesis, based on an interview transcript and both profiles.
Be objective. Reward concrete evidence such as traction, clear problem definition and a credible plan.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for scoring a finished interview
    pub fn scoring_prompt(context: &PersonaContext, transcript: &[ConversationTurn]) -> String {
        let persona = context.persona_display_name();
        let respondent = context.respondent_display_name();

        let mut prompt = format!(
            r#"Investor: {}
Startup: {}

Investor profile:
{}

Startup profile:
{}

Interview transcript:
"#,
            persona,
            respondent,
            Self::render_profile(&context.persona_profile),
            Self::render_profile(&context.respondent_profile),
        );

        for turn in transcript {
            let speaker = match turn.role {
                TurnRole::Persona => persona,
                TurnRole::Respondent => respondent,
            };
            prompt.push_str(&format!("\n{}: {}", speaker, turn.text));
        }

        prompt.push_str(
            r#"

Rate the match between this startup and this investor from 0 to 100.
Reply in exactly this format:
{"score": <number 0-100>, "summary": "<two or three sentences explaining the score>"}"#,
        );

        prompt
    }

    fn render_profile(profile: &serde_json::Value) -> String {
        if profile.is_null() {
            return "(not provided)".to_string();
        }
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| profile.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scoring_prompt_includes_transcript() {
        let context = PersonaContext {
            respondent_profile: json!({ "name": "Orbitly" }),
            persona_profile: serde_json::Value::Null,
            persona_name: "Morgan".to_string(),
        };
        let transcript = vec![
            ConversationTurn::persona("What problem are you solving?"),
            ConversationTurn::respondent("Satellite scheduling."),
        ];
        let prompt = PromptTemplate::scoring_prompt(&context, &transcript);

        assert!(prompt.contains("Morgan: What problem are you solving?"));
        assert!(prompt.contains("Orbitly: Satellite scheduling."));
        assert!(prompt.contains("(not provided)"));
        assert!(prompt.contains("\"score\""));
    }

    #[test]
    fn test_scoring_system_requests_json() {
        assert!(PromptTemplate::scoring_system().contains("JSON"));
    }
}
