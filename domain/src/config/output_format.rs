//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for orchestration results
///
/// This is a domain concept representing how a reply should be rendered
/// for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The response contract as JSON (default)
    Json,
    /// Human-readable summary with question progress
    Text,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Json
    }
}
