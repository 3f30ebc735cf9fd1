//! Progress notification port
//!
//! Defines the interface for reporting collaborator calls during one
//! orchestration run.

use interview_domain::Model;

/// Callback for progress updates during an orchestration run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait InterviewProgress: Send + Sync {
    /// Called before the generation collaborator is invoked
    fn on_generation_start(&self, model: &Model);

    /// Called once the generation collaborator replied (or failed)
    fn on_generation_complete(&self, model: &Model, success: bool);

    /// Called before the scoring collaborator is invoked
    fn on_scoring_start(&self, _model: &Model) {}

    /// Called once scoring finished; `success` is false when no score was produced
    fn on_scoring_complete(&self, _model: &Model, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl InterviewProgress for NoProgress {
    fn on_generation_start(&self, _model: &Model) {}
    fn on_generation_complete(&self, _model: &Model, _success: bool) {}
}
