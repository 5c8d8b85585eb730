//! Core plumbing for the release pipeline
//!
//! - **config**: immutable run configuration built at the process boundary
//! - **error**: pipeline error taxonomy and contextual helpers
//! - **vcs**: git operations abstraction (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
