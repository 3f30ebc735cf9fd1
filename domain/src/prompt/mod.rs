//! Prompt domain
//!
//! Templates for the two collaborators: the scripted persona and the
//! scoring pass.

pub mod interview;
mod template;

pub use interview::{InterviewPromptTemplate, PersonaBrief};
pub use template::PromptTemplate;
