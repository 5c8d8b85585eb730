//! Installer build invocation
//!
//! The build runs synchronously with no timeout; a hung build blocks the
//! pipeline. Exit code is the only failure signal and a non-zero exit aborts
//! the run without retry.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use std::path::Path;
use std::process::Command;

/// Run `npm run tauri build` in the project root
pub fn run_build(root: &Path) -> ShipResult<()> {
  let npm = which::which("npm").map_err(|_| ShipError::ToolNotFound {
    tool: "npm".to_string(),
  })?;

  println!("Running `npm run tauri build` ...");
  let status = Command::new(npm)
    .args(["run", "tauri", "build"])
    .current_dir(root)
    .status()
    .context("Failed to launch npm")?;

  if !status.success() {
    return Err(ShipError::BuildFailed {
      code: status.code(),
    });
  }

  Ok(())
}
