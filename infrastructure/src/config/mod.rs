//! Configuration file loading for persona-interview
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./interview.toml` or `./.interview.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/persona-interview/config.toml`
//! 4. `INTERVIEW_*` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCorrectionConfig, FileGenerationConfig,
    FileLoggingConfig, FileMatchingConfig, FileMatchingStrategy, FileOutputConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
