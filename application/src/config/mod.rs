//! Application-level configuration.
//!
//! - [`InterviewParams`]: collaborator models, matching strategy, reply
//!   correction phrases and the collaborator timeout

pub mod interview_params;

pub use interview_params::{InterviewParams, MatchingStrategy};
