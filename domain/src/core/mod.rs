//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: models the generation and scoring collaborators run on
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text normalisation used by matching and correction

pub mod error;
pub mod model;
pub mod string;
