//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for interview responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response contract as JSON
    Json,
    /// Human-readable summary
    Text,
}

impl From<OutputFormat> for interview_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => interview_domain::OutputFormat::Json,
            OutputFormat::Text => interview_domain::OutputFormat::Text,
        }
    }
}

impl From<interview_domain::OutputFormat> for OutputFormat {
    fn from(format: interview_domain::OutputFormat) -> Self {
        match format {
            interview_domain::OutputFormat::Json => OutputFormat::Json,
            interview_domain::OutputFormat::Text => OutputFormat::Text,
        }
    }
}

/// CLI arguments for persona-interview
#[derive(Parser, Debug)]
#[command(name = "persona-interview")]
#[command(author, version, about = "Scripted investor-persona interviews driven by an LLM")]
#[command(long_about = r#"
Persona Interview runs one turn of a scripted interview: an investor persona
asks the startup founder a fixed list of questions, custom questions first,
then the default script. The caller owns the transcript and re-sends it on
every call; nothing is stored between calls.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./interview.toml         Project-level config
3. ~/.config/persona-interview/config.toml   Global config
4. INTERVIEW_* environment variables

Example:
  persona-interview request.json
  cat request.json | persona-interview --output text
  persona-interview --rehearse --questions questions.json --persona-name "Dana"
"#)]
pub struct Cli {
    /// Request JSON file; reads stdin when omitted or "-"
    #[arg(value_name = "REQUEST")]
    pub request: Option<PathBuf>,

    /// Rehearse an interview interactively, playing the founder
    #[arg(short, long)]
    pub rehearse: bool,

    /// Custom questions for rehearsal (JSON array of {id, question, enabled})
    #[arg(long, value_name = "FILE", requires = "rehearse")]
    pub questions: Option<PathBuf>,

    /// Persona display name for rehearsal
    #[arg(long, value_name = "NAME", requires = "rehearse")]
    pub persona_name: Option<String>,

    /// Extra persona behavior instructions for rehearsal
    #[arg(long, value_name = "TEXT", requires = "rehearse")]
    pub behavior: Option<String>,

    /// Model for persona replies
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Model for match scoring
    #[arg(long, value_name = "MODEL")]
    pub scoring_model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write a JSONL log of collaborator calls to this path
    #[arg(long, value_name = "PATH")]
    pub log_conversation: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether the request comes from stdin
    pub fn reads_stdin(&self) -> bool {
        self.request
            .as_ref()
            .is_none_or(|path| path.as_os_str() == "-")
    }
}
