//! Application layer for persona-interview
//!
//! This crate contains the interview use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{InterviewParams, MatchingStrategy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{InterviewProgress, NoProgress},
};
pub use use_cases::run_interview::{RunInterviewError, RunInterviewUseCase};
