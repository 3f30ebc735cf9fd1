//! Interactive rehearsal module
//!
//! Provides a readline-based interface where the user plays the founder.

mod repl;

pub use repl::RehearsalRepl;
