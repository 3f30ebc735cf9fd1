//! Infrastructure layer for persona-interview
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCorrectionConfig, FileGenerationConfig,
    FileLoggingConfig, FileMatchingConfig, FileMatchingStrategy, FileOutputConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::{
    error::OpenAiError,
    gateway::{OpenAiLlmGateway, OpenAiSettings},
    session::OpenAiSession,
};
