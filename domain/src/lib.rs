//! Domain layer for persona-interview
//!
//! This crate contains the scripted-interview engine's pure logic: building
//! the question catalog, reconstructing which questions were asked from the
//! transcript, choosing the next one, composing the persona instruction and
//! correcting the generated reply. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Catalog**: investor-authored custom questions followed by the default script
//! - **Transcript**: the full conversation, re-supplied by the caller on every call
//! - **Correction**: the generated reply is never trusted to follow the script

pub mod config;
pub mod core;
pub mod interview;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ModelConfig, OutputFormat};
pub use crate::core::{error::DomainError, model::Model};
pub use interview::{
    ConversationTurn, CustomQuestionInput, InterviewRequest, InterviewResponse, MatchPolicy,
    MatchScore, OrchestrationResult, PersonaContext, Question, QuestionCatalog, QuestionOrigin,
    TurnRole,
};
pub use prompt::{InterviewPromptTemplate, PersonaBrief, PromptTemplate};
pub use session::entities::{Message, Role};
