//! System git backend for the change-publish stage
//!
//! Uses the system git binary with an isolated environment. Exit code is the
//! sole success signal; subprocess output is never inspected to classify
//! success beyond that.

use crate::core::error::{GitError, ResultExt, ShipError, ShipResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  pub fn open(path: &Path) -> ShipResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ShipError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ShipError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Check whether a path has uncommitted changes
  ///
  /// Drives the no-op guard of the change-publish stage: an unchanged feed
  /// must not produce an empty commit on re-run.
  pub fn has_changes(&self, path: &Path) -> ShipResult<bool> {
    let output = self
      .git_cmd()
      .args(["status", "--porcelain", "--"])
      .arg(path)
      .output()
      .context("Failed to run git status")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ShipError::Git(GitError::CommandFailed {
        command: "git status".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(!output.stdout.is_empty())
  }

  /// Stage a single path
  pub fn stage(&self, path: &Path) -> ShipResult<()> {
    let output = self
      .git_cmd()
      .args(["add", "--"])
      .arg(path)
      .output()
      .context("Failed to run git add")?;

    if !output.status.success() {
      return Err(ShipError::Git(GitError::StageFailed {
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      }));
    }

    Ok(())
  }

  /// Commit staged changes with the given message
  pub fn commit(&self, message: &str) -> ShipResult<()> {
    let output = self
      .git_cmd()
      .args(["commit", "-m", message])
      .output()
      .context("Failed to run git commit")?;

    if !output.status.success() {
      return Err(ShipError::Git(GitError::CommitFailed {
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      }));
    }

    Ok(())
  }

  /// Push the current branch to its upstream
  ///
  /// A push failure leaves the local commit in place; retrying or reverting
  /// is a manual operator action.
  pub fn push(&self) -> ShipResult<()> {
    let output = self.git_cmd().arg("push").output().context("Failed to run git push")?;

    if !output.status.success() {
      return Err(ShipError::Git(GitError::PushFailed {
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      }));
    }

    Ok(())
  }

  /// Read the origin remote URL and normalize it to an HTTPS base
  ///
  /// Returns `None` when no remote is configured. Only used as the fallback
  /// base for synthesized download URLs.
  pub fn remote_https_base(&self) -> ShipResult<Option<String>> {
    let output = self
      .git_cmd()
      .args(["remote", "get-url", "origin"])
      .output()
      .context("Failed to run git remote get-url")?;

    if !output.status.success() {
      return Ok(None);
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(https_base_from_remote(&url))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");

    cmd
  }
}

/// Normalize a git remote URL to an HTTPS base without the `.git` suffix
///
/// Handles the three forms git reports: scp-like SSH
/// (`git@host:owner/repo.git`), explicit `ssh://` URLs, and HTTP(S) URLs.
/// Anything else is rejected.
pub fn https_base_from_remote(url: &str) -> Option<String> {
  let url = url.trim().trim_end_matches('/');
  let url = url.strip_suffix(".git").unwrap_or(url);

  if let Some(rest) = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
    return Some(format!("https://{}", rest));
  }

  if let Some(rest) = url.strip_prefix("ssh://") {
    let rest = rest.split_once('@').map_or(rest, |(_, host_path)| host_path);
    return Some(format!("https://{}", rest));
  }

  // scp-like: git@github.com:owner/repo
  if let Some((user_host, path)) = url.split_once(':')
    && let Some((_, host)) = user_host.split_once('@')
    && !path.contains(':')
  {
    return Some(format!("https://{}/{}", host, path));
  }

  None
}
