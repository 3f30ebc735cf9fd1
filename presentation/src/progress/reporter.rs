//! Progress reporting for interview turns

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interview_application::ports::progress::InterviewProgress;
use interview_domain::Model;
use std::sync::Mutex;
use std::time::Duration;

/// Reports collaborator calls with a spinner on stderr
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, prefix: &'static str, model: &Model) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(format!("({})", model).dimmed().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn finish(&self, model: &Model, success: bool, failure_note: &str) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {} ({})", "x".red(), model, failure_note)
            };
            pb.finish_with_message(status);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewProgress for ProgressReporter {
    fn on_generation_start(&self, model: &Model) {
        self.start("Persona is thinking", model);
    }

    fn on_generation_complete(&self, model: &Model, success: bool) {
        self.finish(model, success, "failed");
    }

    fn on_scoring_start(&self, model: &Model) {
        self.start("Scoring the match", model);
    }

    fn on_scoring_complete(&self, model: &Model, success: bool) {
        self.finish(model, success, "no score");
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl InterviewProgress for SimpleProgress {
    fn on_generation_start(&self, model: &Model) {
        eprintln!("{} {} ({})", "->".cyan(), "Generating reply".bold(), model);
    }

    fn on_generation_complete(&self, model: &Model, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_scoring_start(&self, model: &Model) {
        eprintln!("{} {} ({})", "->".cyan(), "Scoring match".bold(), model);
    }

    fn on_scoring_complete(&self, model: &Model, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (no score)", "x".red(), model);
        }
    }
}
