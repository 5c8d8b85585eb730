//! Error types for the release pipeline
//!
//! Every failure is fatal to the current run. Nothing is retried: each error
//! is either an operator precondition (missing tool, bad input) or a
//! non-idempotent external action whose blind retry risks duplication.

use std::fmt;
use std::path::PathBuf;

pub type ShipResult<T> = Result<T, ShipError>;

/// Pipeline error taxonomy
#[derive(Debug)]
pub enum ShipError {
  /// Target version does not match the release semver grammar
  InvalidVersion { input: String },
  /// Publish timestamp could not be parsed as ISO-8601/RFC3339
  InvalidTimestamp { input: String },
  /// No release notes were provided
  NotesMissing,
  /// Both --notes and --notes-file were provided
  NotesConflict,
  /// The --notes-file path does not exist
  NotesFileNotFound { path: PathBuf },
  /// A manifest is missing its version entry
  ManifestFieldNotFound { path: PathBuf },
  /// A required external tool is not on PATH
  ToolNotFound { tool: String },
  /// The build command exited non-zero
  BuildFailed { code: Option<i32> },
  /// An explicit installer path (or the bundle directory) does not exist
  ArtifactNotFound { path: PathBuf },
  /// No installer in the bundle directory matches the target version
  NoArtifactMatch { version: String, dir: PathBuf },
  /// The installer has no sibling .sig file
  SignatureMissing { path: PathBuf },
  /// The hosting CLI has no authenticated session
  NotAuthenticated,
  /// The hosting CLI failed to create the release
  ReleaseCreationFailed { stderr: String },
  /// A git operation failed
  Git(GitError),
  /// Contextual wrapper for io/serde failures
  Message(String),
}

/// Failures from the system git backend
#[derive(Debug)]
pub enum GitError {
  RepoNotFound { path: PathBuf },
  CommandFailed { command: String, stderr: String },
  StageFailed { stderr: String },
  CommitFailed { stderr: String },
  PushFailed { stderr: String },
}

impl ShipError {
  /// Create a plain message error
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message(msg.into())
  }

  /// Process exit status for this error: 2 for bad invocations, 1 otherwise
  pub fn exit_code(&self) -> i32 {
    match self {
      ShipError::InvalidVersion { .. }
      | ShipError::InvalidTimestamp { .. }
      | ShipError::NotesMissing
      | ShipError::NotesConflict
      | ShipError::NotesFileNotFound { .. } => 2,
      _ => 1,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::InvalidVersion { input } => {
        write!(f, "Invalid version '{}'. Expected SemVer such as 0.1.5", input)
      }
      ShipError::InvalidTimestamp { input } => {
        write!(f, "Invalid publish timestamp '{}'. Expected RFC3339 such as 2025-11-15T09:00:00Z", input)
      }
      ShipError::NotesMissing => write!(f, "Provide release notes via --notes or --notes-file"),
      ShipError::NotesConflict => write!(f, "Use either --notes or --notes-file, not both"),
      ShipError::NotesFileNotFound { path } => write!(f, "Notes file not found: {}", path.display()),
      ShipError::ManifestFieldNotFound { path } => {
        write!(f, "Could not locate a version entry inside {}", path.display())
      }
      ShipError::ToolNotFound { tool } => {
        write!(f, "Could not find `{}` on PATH. Ensure it is installed", tool)
      }
      ShipError::BuildFailed { code } => match code {
        Some(code) => write!(f, "Build failed with exit code {}", code),
        None => write!(f, "Build was terminated by a signal"),
      },
      ShipError::ArtifactNotFound { path } => write!(f, "Installer not found: {}", path.display()),
      ShipError::NoArtifactMatch { version, dir } => {
        write!(f, "No installer containing '{}' inside {}", version, dir.display())
      }
      ShipError::SignatureMissing { path } => write!(f, "Missing signature file: {}", path.display()),
      ShipError::NotAuthenticated => {
        write!(f, "gh has no authenticated session. Run `gh auth login` first")
      }
      ShipError::ReleaseCreationFailed { stderr } => {
        write!(f, "gh release create failed: {}", stderr)
      }
      ShipError::Git(err) => write!(f, "{}", err),
      ShipError::Message(msg) => write!(f, "{}", msg),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::RepoNotFound { path } => write!(f, "Not a git repository: {}", path.display()),
      GitError::CommandFailed { command, stderr } => write!(f, "{} failed: {}", command, stderr),
      GitError::StageFailed { stderr } => write!(f, "git add failed: {}", stderr),
      GitError::CommitFailed { stderr } => write!(f, "git commit failed: {}", stderr),
      GitError::PushFailed { stderr } => write!(f, "git push failed: {}", stderr),
    }
  }
}

impl std::error::Error for ShipError {}
impl std::error::Error for GitError {}

impl From<GitError> for ShipError {
  fn from(err: GitError) -> Self {
    ShipError::Git(err)
  }
}

impl From<std::io::Error> for ShipError {
  fn from(err: std::io::Error) -> Self {
    ShipError::Message(err.to_string())
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::Message(err.to_string())
  }
}

/// Attach context to io/serde errors while converting into `ShipError`
pub trait ResultExt<T> {
  fn context(self, msg: &str) -> ShipResult<T>;
  fn with_context<F: FnOnce() -> String>(self, f: F) -> ShipResult<T>;
}

impl<T, E: fmt::Display> ResultExt<T> for Result<T, E> {
  fn context(self, msg: &str) -> ShipResult<T> {
    self.map_err(|e| ShipError::Message(format!("{}: {}", msg, e)))
  }

  fn with_context<F: FnOnce() -> String>(self, f: F) -> ShipResult<T> {
    self.map_err(|e| ShipError::Message(format!("{}: {}", f(), e)))
  }
}

/// Print a single error line to stderr
pub fn print_error(err: &ShipError) {
  eprintln!("❌ {}", err);
}
