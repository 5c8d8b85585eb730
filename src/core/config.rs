//! Release run configuration
//!
//! One `ReleaseConfig` is built at the process boundary from the parsed CLI
//! and handed through the pipeline. No stage reads ambient global state.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use std::path::PathBuf;

pub const DEFAULT_BUNDLE_DIR: &str = "src-tauri/target/release/bundle/msi";
pub const DEFAULT_FEED_PATH: &str = "latest.json";

/// Immutable input for a single release run
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
  /// Target version to apply everywhere (validated before any mutation)
  pub version: String,

  /// Release notes for the update feed and the hosted release body
  pub notes: String,

  /// Publish timestamp override (current UTC time when absent)
  pub pub_date: Option<String>,

  /// Skip the installer build (the artifact must already exist)
  pub skip_build: bool,

  /// Explicit installer path, bypassing bundle-directory search
  pub artifact_path: Option<PathBuf>,

  /// Directory searched for version-tagged installers
  pub bundle_dir: PathBuf,

  /// Update feed file to rewrite
  pub feed_path: PathBuf,

  /// Override for the download URL base
  pub download_base: Option<String>,

  /// Skip creating the hosted release
  pub skip_release: bool,

  /// Skip committing and pushing the feed
  pub skip_push: bool,
}

/// Resolve release notes from the CLI: inline text or a file, never both
pub fn resolve_notes(inline: Option<String>, file: Option<PathBuf>) -> ShipResult<String> {
  let raw = match (inline, file) {
    (Some(_), Some(_)) => return Err(ShipError::NotesConflict),
    (None, None) => return Err(ShipError::NotesMissing),
    (Some(text), None) => text,
    (None, Some(path)) => {
      if !path.exists() {
        return Err(ShipError::NotesFileNotFound { path });
      }
      std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read notes from {}", path.display()))?
    }
  };

  let notes = raw.trim().to_string();
  if notes.is_empty() {
    return Err(ShipError::NotesMissing);
  }
  Ok(notes)
}
