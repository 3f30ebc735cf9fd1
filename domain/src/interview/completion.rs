//! Completion gating and match-score parsing.
//!
//! A conversation is complete once every catalog question has been asked
//! and the transcript is long enough to hold an answer to all but the last
//! of them (`2 × N − 1` turns). Only then is the scoring collaborator
//! consulted; its reply is parsed by [`parse_match_score`].

use super::catalog::QuestionCatalog;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lowest and highest score the scoring collaborator may report
pub const SCORE_RANGE: (f64, f64) = (0.0, 100.0);

/// Structured result of the scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: f64,
    pub summary: String,
}

/// Minimum transcript length for a catalog of `catalog_size` questions.
pub fn required_turns(catalog_size: usize) -> usize {
    (2 * catalog_size).saturating_sub(1)
}

/// Whether the scripted interview has run its course.
pub fn is_complete(catalog: &QuestionCatalog, transcript_len: usize) -> bool {
    !catalog.is_empty()
        && catalog.questions().iter().all(|q| q.asked)
        && transcript_len >= required_turns(catalog.len())
}

/// Parse the scoring collaborator's reply.
///
/// Accepts a bare JSON object or one embedded in prose / a markdown fence.
/// `score` may be a number or a numeric string and is clamped to
/// [`SCORE_RANGE`]; `summary` must be a non-empty string.
///
/// ```
/// use interview_domain::interview::completion::parse_match_score;
///
/// let parsed = parse_match_score(r#"{"score": 82, "summary": "Strong fit"}"#).unwrap();
/// assert_eq!(parsed.score, 82.0);
/// assert!(parse_match_score("no idea").is_err());
/// ```
pub fn parse_match_score(response: &str) -> Result<MatchScore, DomainError> {
    let start = response
        .find('{')
        .ok_or_else(|| DomainError::ScoreParse("no JSON object in reply".to_string()))?;
    let end = response[start..]
        .rfind('}')
        .ok_or_else(|| DomainError::ScoreParse("unterminated JSON object".to_string()))?;
    let json_str = &response[start..start + end + 1];

    let parsed: Value =
        serde_json::from_str(json_str).map_err(|e| DomainError::ScoreParse(e.to_string()))?;

    let score = match parsed.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|s| s.is_finite())
    .ok_or_else(|| DomainError::ScoreParse("missing or non-numeric score".to_string()))?;

    let summary = parsed
        .get("summary")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DomainError::ScoreParse("missing summary".to_string()))?;

    Ok(MatchScore {
        score: score.clamp(SCORE_RANGE.0, SCORE_RANGE.1),
        summary: summary.to_string(),
    })
}
