//! CLI entrypoint for Persona Interview
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use interview_application::{
    ConversationLogger, NoConversationLogger, RunInterviewError, RunInterviewUseCase,
};
use interview_domain::{CustomQuestionInput, InterviewRequest, Model, PersonaContext};
use interview_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiLlmGateway};
use interview_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, RehearsalRepl};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, config.logging.file_path().as_deref());

    info!("Starting Persona Interview");

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let mut params = config.to_interview_params();
    if let Some(model) = &cli.model {
        let Ok(model) = model.parse::<Model>();
        params.models.persona = model;
    }
    if let Some(model) = &cli.scoring_model {
        let Ok(model) = model.parse::<Model>();
        params.models.scoring = model;
    }

    let gateway = Arc::new(
        OpenAiLlmGateway::new(config.to_openai_settings())
            .context("Failed to initialize the chat completions client")?,
    );

    let use_case = RunInterviewUseCase::with_params(gateway, params)
        .with_conversation_logger(conversation_logger(&cli, &config));

    // Rehearsal mode
    if cli.rehearse {
        let questions = match &cli.questions {
            Some(path) => read_questions(path)?,
            None => Vec::new(),
        };
        let persona_context = PersonaContext {
            persona_name: cli.persona_name.clone().unwrap_or_default(),
            ..PersonaContext::default()
        };

        let mut repl = RehearsalRepl::new(use_case)
            .with_custom_questions(questions)
            .with_persona_context(persona_context)
            .with_behavior_prompt(cli.behavior.clone())
            .with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single request mode
    let request = read_request(&cli)?;
    let format = cli
        .output
        .or(config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Json);

    let result = if cli.quiet {
        use_case.execute(&request).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&request, &progress).await
    };

    match result {
        Ok(result) => {
            let response = result.into_response(request.conversation_id.clone());
            println!("{}", ConsoleFormatter::format(&response, format));
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind(), "Interview turn failed: {}", e);
            if format == OutputFormat::Json {
                println!(
                    "{}",
                    ConsoleFormatter::format_error_json(
                        e.kind(),
                        &e.to_string(),
                        Some(&request.conversation_id)
                    )
                );
            }
            Err(fatal(e))
        }
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// Logs go to stderr so stdout carries only the response.
fn init_logging(verbose: u8, file: Option<&Path>) -> Option<WorkerGuard> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("persona-interview.log"));
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn conversation_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let path = cli
        .log_conversation
        .clone()
        .or_else(|| config.logging.conversation_log_path());

    let Some(path) = path else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(&path) {
        Ok(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Conversation log disabled, cannot open {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

fn read_request(cli: &Cli) -> Result<InterviewRequest> {
    let raw = match &cli.request {
        Some(path) if !cli.reads_stdin() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    if raw.trim().is_empty() {
        bail!("Request is empty. Pass a request JSON file or pipe one to stdin.");
    }

    serde_json::from_str(&raw).context("Request is not a valid interview request")
}

fn read_questions(path: &Path) -> Result<Vec<CustomQuestionInput>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read questions file {}", path.display()))?;
    let questions: Vec<CustomQuestionInput> =
        serde_json::from_str(&raw).context("Questions file must be a JSON array")?;
    if questions.is_empty() {
        warn!("Questions file {} is empty", path.display());
    }
    Ok(questions)
}

fn fatal(err: RunInterviewError) -> anyhow::Error {
    match err {
        RunInterviewError::Configuration(msg) => {
            anyhow::anyhow!("Configuration error: {}. Check [generation] in your config.", msg)
        }
        other => anyhow::Error::new(other),
    }
}
