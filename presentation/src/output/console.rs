//! Console output formatter for interview responses

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use interview_domain::{ConversationTurn, InterviewResponse, Question, TurnRole};
use serde_json::json;

/// Formats interview responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format in the requested output format
    pub fn format(response: &InterviewResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(response),
            OutputFormat::Text => Self::format_text(response),
        }
    }

    /// Format as JSON
    pub fn format_json(response: &InterviewResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Fatal error as a JSON object, for callers that parse stdout
    pub fn format_error_json(kind: &str, message: &str, conversation_id: Option<&str>) -> String {
        let value = json!({
            "error": message,
            "kind": kind,
            "conversationId": conversation_id,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the reply plus script progress
    pub fn format_text(response: &InterviewResponse) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n\n",
            "Conversation:".dimmed(),
            response.conversation_id
        ));
        output.push_str(&format!("{}\n{}\n\n", "Reply:".cyan().bold(), response.response));
        output.push_str(&Self::format_progress(response));

        if !response.remaining_questions.is_empty() {
            output.push_str(&Self::section_header("Remaining Questions"));
            for (i, question) in response.remaining_questions.iter().enumerate() {
                output.push_str(&format!("{}\n", Self::question_line(i + 1, question)));
            }
        }

        if let Some(score) = response.match_score {
            output.push_str(&Self::section_header("Match Score"));
            output.push_str(&format!("{}\n", Self::score_label(score)));
            if let Some(summary) = &response.match_summary {
                output.push_str(&format!("{}\n", Self::indent(summary, "  ")));
            }
        }

        output
    }

    /// One-line script progress
    pub fn format_progress(response: &InterviewResponse) -> String {
        let state = if response.is_question_pending {
            "question pending".yellow()
        } else {
            "script finished".green()
        };
        format!(
            "{} custom {}/{}, default {}/{} ({})\n",
            "Progress:".cyan().bold(),
            response.custom_asked,
            response.custom_total,
            response.default_asked,
            response.default_total,
            state
        )
    }

    /// Render a transcript with speaker labels
    pub fn format_transcript(turns: &[ConversationTurn], persona: &str, respondent: &str) -> String {
        if turns.is_empty() {
            return format!("{}\n", "(empty transcript)".dimmed());
        }
        turns
            .iter()
            .map(|turn| match turn.role {
                TurnRole::Persona => format!("{} {}", format!("{}:", persona).cyan().bold(), turn.text),
                TurnRole::Respondent => {
                    format!("{} {}", format!("{}:", respondent).green().bold(), turn.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            + "\n"
    }

    fn question_line(n: usize, question: &Question) -> String {
        let tag = if question.is_custom() {
            question.origin.tag().magenta()
        } else {
            question.origin.tag().dimmed()
        };
        format!("  {}. {} {}", n, tag, question.text)
    }

    fn score_label(score: f64) -> String {
        let label = format!("{:.0}/100", score);
        if score >= 70.0 {
            label.green().bold().to_string()
        } else if score >= 40.0 {
            label.yellow().bold().to_string()
        } else {
            label.red().bold().to_string()
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_json(&self, response: &InterviewResponse) -> String {
        Self::format_json(response)
    }

    fn format_text(&self, response: &InterviewResponse) -> String {
        Self::format_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> InterviewResponse {
        InterviewResponse {
            response: "What is your burn rate?".to_string(),
            match_score: None,
            match_summary: None,
            conversation_id: "conv-1".to_string(),
            is_question_pending: true,
            remaining_questions: vec![Question::custom("q1", "What is your burn rate?")],
            asked_question_ids: vec!["q1".to_string()],
            custom_asked: 1,
            custom_total: 1,
            default_asked: 0,
            default_total: 5,
        }
    }

    #[test]
    fn test_format_json_uses_contract_field_names() {
        let json = ConsoleFormatter::format_json(&response());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["response"], "What is your burn rate?");
        assert_eq!(value["conversationId"], "conv-1");
        assert_eq!(value["isQuestionPending"], true);
        assert_eq!(value["customAsked"], 1);
        assert!(value["matchScore"].is_null());
    }

    #[test]
    fn test_format_error_json() {
        let json = ConsoleFormatter::format_error_json("configuration", "no key", Some("conv-9"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "configuration");
        assert_eq!(value["error"], "no key");
        assert_eq!(value["conversationId"], "conv-9");
    }

    #[test]
    fn test_format_text_shows_progress_and_score() {
        colored::control::set_override(false);
        let mut finished = response();
        finished.is_question_pending = false;
        finished.remaining_questions.clear();
        finished.match_score = Some(81.0);
        finished.match_summary = Some("Strong fit.".to_string());

        let text = ConsoleFormatter::format_text(&finished);

        assert!(text.contains("custom 1/1, default 0/5"));
        assert!(text.contains("script finished"));
        assert!(text.contains("81/100"));
        assert!(text.contains("  Strong fit."));
        assert!(!text.contains("Remaining Questions"));
    }

    #[test]
    fn test_format_transcript() {
        colored::control::set_override(false);
        let turns = vec![
            ConversationTurn::persona("Why now?"),
            ConversationTurn::respondent("Regulation changed."),
        ];
        let text = ConsoleFormatter::format_transcript(&turns, "Dana", "You");

        assert_eq!(text, "Dana: Why now?\nYou: Regulation changed.\n");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
