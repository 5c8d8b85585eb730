//! Hosted release creation through the GitHub CLI
//!
//! `gh` being installed and authenticated is an operator precondition, not
//! something to retry. A partially created release is never deleted here;
//! cleanup is a manual operator action.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle to a located, authenticated `gh` binary
pub struct HostingCli {
  gh: PathBuf,
}

impl HostingCli {
  /// Locate `gh` on PATH and verify the operator is authenticated
  pub fn locate() -> ShipResult<Self> {
    let gh = which::which("gh").map_err(|_| ShipError::ToolNotFound {
      tool: "gh".to_string(),
    })?;

    let auth = Command::new(&gh)
      .args(["auth", "status"])
      .output()
      .context("Failed to run gh auth status")?;
    if !auth.status.success() {
      return Err(ShipError::NotAuthenticated);
    }

    Ok(Self { gh })
  }

  /// Create a tagged release and upload the installer assets
  ///
  /// The notes are passed verbatim as the release body.
  pub fn create_release(
    &self,
    root: &Path,
    tag: &str,
    title: &str,
    notes: &str,
    assets: &[&Path],
  ) -> ShipResult<()> {
    let mut cmd = Command::new(&self.gh);
    cmd.current_dir(root).args(["release", "create", tag]);
    for asset in assets {
      cmd.arg(asset);
    }
    cmd.args(["--title", title]);
    cmd.args(["--notes", notes]);

    let output = cmd.output().context("Failed to launch gh release create")?;
    if !output.status.success() {
      return Err(ShipError::ReleaseCreationFailed {
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(())
  }
}
