//! Output formatter trait

use interview_domain::InterviewResponse;

/// Trait for formatting interview responses
pub trait OutputFormatter {
    /// Format as the JSON response contract
    fn format_json(&self, response: &InterviewResponse) -> String;

    /// Format as a human-readable summary
    fn format_text(&self, response: &InterviewResponse) -> String;
}
