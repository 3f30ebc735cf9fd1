//! Messages exchanged with a generation collaborator.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::Role`]: system / user / assistant

pub mod entities;
