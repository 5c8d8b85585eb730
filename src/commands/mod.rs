//! CLI command implementations
//!
//! - **release**: the full publish pipeline, driven by one `ReleaseConfig`

pub mod release;

pub use release::run_release;
