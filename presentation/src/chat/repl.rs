//! REPL (Read-Eval-Print Loop) for interview rehearsal
//!
//! The REPL owns the transcript and re-sends all of it on every turn, the
//! same way any other caller of the engine has to.

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use interview_application::{LlmGateway, RunInterviewError, RunInterviewUseCase};
use interview_domain::{
    ConversationTurn, CustomQuestionInput, InterviewRequest, InterviewResponse, PersonaContext,
};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const HISTORY_CAPACITY: usize = 500;

/// Interactive rehearsal REPL
pub struct RehearsalRepl<G: LlmGateway + 'static> {
    use_case: RunInterviewUseCase<G>,
    custom_questions: Vec<CustomQuestionInput>,
    persona_context: PersonaContext,
    behavior_prompt: Option<String>,
    transcript: Vec<ConversationTurn>,
    conversation_id: String,
    last_response: Option<InterviewResponse>,
    complete: bool,
    show_progress: bool,
}

impl<G: LlmGateway + 'static> RehearsalRepl<G> {
    /// Create a new RehearsalRepl
    pub fn new(use_case: RunInterviewUseCase<G>) -> Self {
        Self {
            use_case,
            custom_questions: Vec::new(),
            persona_context: PersonaContext::default(),
            behavior_prompt: None,
            transcript: Vec::new(),
            conversation_id: new_conversation_id(),
            last_response: None,
            complete: false,
            show_progress: true,
        }
    }

    pub fn with_custom_questions(mut self, questions: Vec<CustomQuestionInput>) -> Self {
        self.custom_questions = questions;
        self
    }

    pub fn with_persona_context(mut self, context: PersonaContext) -> Self {
        self.persona_context = context;
        self
    }

    pub fn with_behavior_prompt(mut self, prompt: Option<String>) -> Self {
        self.behavior_prompt = prompt;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Whether the script has run its course in this rehearsal
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("persona-interview").join("history.txt"));
        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(history) = FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
                line_editor = line_editor.with_history(Box::new(history));
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("founder".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                    continue;
                }
            }
        }

        Ok(())
    }

    /// Run one engine call and record both turns on success.
    pub async fn send(&mut self, message: &str) -> Result<InterviewResponse, RunInterviewError> {
        let mut request = InterviewRequest::new(self.conversation_id.clone(), message)
            .with_history(self.transcript.clone())
            .with_custom_questions(self.custom_questions.clone())
            .with_persona_context(self.persona_context.clone());
        if let Some(behavior) = &self.behavior_prompt {
            request = request.with_behavior_prompt(behavior.clone());
        }

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(&request, &progress).await
        } else {
            self.use_case.execute(&request).await
        }?;

        self.transcript.push(ConversationTurn::respondent(message));
        self.transcript.push(ConversationTurn::persona(&result.reply_text));
        self.complete = result.is_complete;

        let response = result.into_response(self.conversation_id.clone());
        self.last_response = Some(response.clone());
        Ok(response)
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Persona Interview - Rehearsal         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Interviewer: {}   Custom questions: {}",
            self.persona_context.persona_display_name(),
            self.custom_questions.len()
        );
        println!();
        println!("Say hello to start. You are the founder.");
        println!();
        Self::print_commands();
    }

    fn print_commands() {
        println!("Commands:");
        println!("  /status      - Show script progress");
        println!("  /transcript  - Show the conversation so far");
        println!("  /reset       - Start a new interview");
        println!("  /help        - Show this help");
        println!("  /quit        - Exit rehearsal");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_commands();
                false
            }
            "/status" => {
                println!();
                match &self.last_response {
                    Some(response) => print!("{}", ConsoleFormatter::format_progress(response)),
                    None => println!("No questions asked yet."),
                }
                println!();
                false
            }
            "/transcript" => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_transcript(
                        &self.transcript,
                        self.persona_context.persona_display_name(),
                        "You"
                    )
                );
                println!();
                false
            }
            "/reset" => {
                self.reset();
                println!("{}", "Started a new interview.".green());
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    fn reset(&mut self) {
        self.transcript.clear();
        self.last_response = None;
        self.complete = false;
        self.conversation_id = new_conversation_id();
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        if self.complete {
            println!("{}", "Interview complete. Use /reset to start over.".dimmed());
            println!();
            return;
        }

        match self.send(message).await {
            Ok(response) => {
                println!(
                    "{} {}",
                    format!("{}:", self.persona_context.persona_display_name())
                        .cyan()
                        .bold(),
                    response.response
                );
                if let Some(score) = response.match_score {
                    println!();
                    println!("{} {:.0}/100", "Match score:".green().bold(), score);
                    if let Some(summary) = &response.match_summary {
                        println!("{}", ConsoleFormatter::indent(summary, "  "));
                    }
                }
                if self.complete {
                    println!();
                    println!("{}", "Interview complete. Use /reset to start over.".dimmed());
                }
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
        println!();
    }
}

fn new_conversation_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("rehearsal-{}", millis)
}
