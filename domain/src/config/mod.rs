//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod model_config;
mod output_format;

pub use model_config::ModelConfig;
pub use output_format::OutputFormat;
