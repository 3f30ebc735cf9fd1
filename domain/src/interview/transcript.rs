//! Conversation transcript types

use crate::session::entities::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the conversation produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The startup answering questions
    #[serde(alias = "user", alias = "startup")]
    Respondent,
    /// The simulated investor asking them
    #[serde(alias = "assistant", alias = "investor")]
    Persona,
}

/// One turn of the conversation, read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl ConversationTurn {
    pub fn respondent(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Respondent,
            text: text.into(),
            occurred_at: None,
        }
    }

    pub fn persona(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Persona,
            text: text.into(),
            occurred_at: None,
        }
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    pub fn is_persona(&self) -> bool {
        self.role == TurnRole::Persona
    }

    /// Role-tagged message for the generation collaborator
    pub fn to_message(&self) -> Message {
        match self.role {
            TurnRole::Persona => Message::assistant(&self.text),
            TurnRole::Respondent => Message::user(&self.text),
        }
    }
}
