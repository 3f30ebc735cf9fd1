//! Scripted interview domain
//!
//! The engine that keeps a simulated investor on a fixed, ordered script of
//! questions.
//!
//! # Flow per inbound message
//!
//! ```text
//! catalog::QuestionCatalog::build      custom + default, custom first
//!          │
//! matcher::match_transcript            asked flags, recomputed from the transcript
//!          │
//! selector::select_next                first unasked, custom before default
//!          │
//! prompt::InterviewPromptTemplate      instruction for the generation collaborator
//!          │
//!   (generation collaborator)
//!          │
//! corrector::ResponseCorrector         mandated question verbatim, nothing extra
//!          │
//! completion::is_complete              scoring collaborator, once
//! ```
//!
//! Nothing here keeps state between calls: every call starts from the
//! transcript the caller supplies.

pub mod catalog;
pub mod completion;
pub mod contract;
pub mod corrector;
pub mod matcher;
pub mod question;
pub mod selector;
pub mod transcript;

pub use catalog::{
    CatalogBuild, CustomQuestionInput, DEFAULT_QUESTIONS, QuestionCatalog, RejectReason,
    RejectedEntry, ValidCustomQuestion,
};
pub use completion::{MatchScore, is_complete, parse_match_score, required_turns};
pub use contract::{
    InterviewRequest, InterviewResponse, OrchestrationResult, PersonaContext, QuestionConfig,
};
pub use corrector::{
    Correction, CorrectionKind, CorrectionPolicy, ReplyRequirement, ResponseCorrector,
};
pub use matcher::{
    ExactMatcher, FuzzyMatcher, MatchPolicy, MatchReport, QuestionMatcher, match_transcript,
};
pub use question::{Question, QuestionOrigin};
pub use selector::select_next;
pub use transcript::{ConversationTurn, TurnRole};
