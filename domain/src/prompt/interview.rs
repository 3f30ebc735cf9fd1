//! Persona instruction composer
//!
//! Builds the system instruction for the generation collaborator. Pure
//! formatting: no I/O, no correction logic. Whatever the collaborator does
//! with these instructions is checked afterwards by
//! [`ResponseCorrector`](crate::interview::corrector::ResponseCorrector).

use crate::interview::catalog::QuestionCatalog;
use crate::interview::contract::PersonaContext;
use crate::interview::question::Question;

/// Everything the persona instruction is built from
#[derive(Debug, Clone, Copy)]
pub struct PersonaBrief<'a> {
    pub catalog: &'a QuestionCatalog,
    pub next: Option<&'a Question>,
    pub context: &'a PersonaContext,
    pub behavior_prompt: Option<&'a str>,
}

/// Templates for the scripted persona
pub struct InterviewPromptTemplate;

impl InterviewPromptTemplate {
    /// System instruction for one persona reply
    pub fn persona_system(brief: &PersonaBrief<'_>) -> String {
        let persona = brief.context.persona_display_name();
        let respondent = brief.context.respondent_display_name();

        let mut prompt = format!(
            r#"You are {persona}, an investor interviewing {respondent}, a startup founder, on a matching platform.
Stay in character. Keep replies short and conversational.
"#
        );

        if let Some(behavior) = brief.behavior_prompt.map(str::trim).filter(|b| !b.is_empty()) {
            prompt.push_str(&format!("\n## Persona Behavior\n\n{}\n", behavior));
        }

        if let Some(profile) = Self::profile_block("Your Profile", &brief.context.persona_profile) {
            prompt.push_str(&profile);
        }
        if let Some(profile) =
            Self::profile_block("Startup Profile", &brief.context.respondent_profile)
        {
            prompt.push_str(&profile);
        }

        prompt.push_str("\n## Interview Questions\n\n");
        prompt.push_str(&Self::question_list(brief.catalog));

        let custom_total = brief.catalog.custom_total();
        let custom_asked = brief
            .catalog
            .questions()
            .iter()
            .any(|q| q.is_custom() && q.asked);
        if custom_total > 0 && !custom_asked {
            prompt.push_str(
                r#"
**IMPORTANT: The [CUSTOM] questions take absolute priority. They were written by the investor and MUST be asked before any [default] question.**
"#,
            );
        }

        prompt.push_str("\n## Your Task For This Reply\n\n");
        match brief.next {
            Some(q) => prompt.push_str(&format!(
                r#"Briefly acknowledge the founder's last message, then ask exactly this question, word for word:

"{}"

Rules:
- Ask this exact text verbatim. Do not rephrase it.
- Do not add an introduction to the question.
- Do not ask any additional question.
- Do not summarize the conversation.
"#,
                q.text
            )),
            None => prompt.push_str(
                r#"All questions have been asked. Do NOT ask any question at all.
Only acknowledge the founder's last answer and thank them for their time.
"#,
            ),
        }

        prompt
    }

    /// Numbered catalog listing with origin and status tags
    pub fn question_list(catalog: &QuestionCatalog) -> String {
        catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| {
                format!(
                    "{}. {} {} {}",
                    i + 1,
                    q.origin.tag(),
                    q.text,
                    q.status_label()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
            + "\n"
    }

    fn profile_block(title: &str, profile: &serde_json::Value) -> Option<String> {
        let is_empty = match profile {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if is_empty {
            return None;
        }
        let rendered = serde_json::to_string_pretty(profile).ok()?;
        Some(format!("\n## {}\n\n```json\n{}\n```\n", title, rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::catalog::CustomQuestionInput;
    use serde_json::json;

    fn catalog_with_custom() -> QuestionCatalog {
        QuestionCatalog::build(&[CustomQuestionInput::new("Who else is on the cap table?")]).catalog
    }

    #[test]
    fn test_lists_every_question_with_tags() {
        let catalog = catalog_with_custom();
        let list = InterviewPromptTemplate::question_list(&catalog);

        assert_eq!(list.lines().count(), 6);
        assert!(list.starts_with("1. [CUSTOM] Who else is on the cap table? (not asked yet)"));
        assert!(list.contains("2. [default]"));
    }

    #[test]
    fn test_next_question_is_quoted_verbatim() {
        let catalog = catalog_with_custom();
        let context = PersonaContext::default();
        let brief = PersonaBrief {
            catalog: &catalog,
            next: catalog.questions().first(),
            context: &context,
            behavior_prompt: Some("Skeptical but fair."),
        };
        let prompt = InterviewPromptTemplate::persona_system(&brief);

        assert!(prompt.contains("\"Who else is on the cap table?\""));
        assert!(prompt.contains("word for word"));
        assert!(prompt.contains("Skeptical but fair."));
        assert!(prompt.contains("absolute priority"));
    }

    #[test]
    fn test_no_question_when_script_done() {
        let mut questions = QuestionCatalog::defaults_only().into_questions();
        for q in questions.iter_mut() {
            q.asked = true;
        }
        let catalog = QuestionCatalog::from_questions(questions);
        let context = PersonaContext::default();
        let brief = PersonaBrief {
            catalog: &catalog,
            next: None,
            context: &context,
            behavior_prompt: None,
        };
        let prompt = InterviewPromptTemplate::persona_system(&brief);

        assert!(prompt.contains("Do NOT ask any question"));
        assert!(prompt.contains("(already asked)"));
        assert!(!prompt.contains("absolute priority"));
    }

    #[test]
    fn test_profiles_and_names_rendered() {
        let catalog = QuestionCatalog::defaults_only();
        let context = PersonaContext {
            respondent_profile: json!({ "name": "Orbitly", "stage": "seed" }),
            persona_profile: json!({}),
            persona_name: "Morgan".to_string(),
        };
        let brief = PersonaBrief {
            catalog: &catalog,
            next: catalog.questions().first(),
            context: &context,
            behavior_prompt: None,
        };
        let prompt = InterviewPromptTemplate::persona_system(&brief);

        assert!(prompt.starts_with("You are Morgan, an investor interviewing Orbitly"));
        assert!(prompt.contains("## Startup Profile"));
        assert!(!prompt.contains("## Your Profile"));
    }
}
