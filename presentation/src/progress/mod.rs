//! Progress reporting for collaborator calls

pub mod reporter;
