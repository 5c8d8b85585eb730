//! Integration tests for the shipway CLI
//!
//! Each test builds a throwaway Tauri-shaped project in a tempdir and runs
//! the real binary against it. External tools beyond git (npm, gh) are never
//! required: the build and hosted-release stages are skipped.

mod test_pipeline;
mod test_publish;
