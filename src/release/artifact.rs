//! Installer discovery and signature binding
//!
//! Locates the built installer by version-tagged filename, or takes an
//! explicit override path, then loads the detached signature next to it.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use std::path::{Path, PathBuf};

/// Installer file extension searched in the bundle directory
pub const INSTALLER_EXT: &str = "msi";

/// Locate the built installer for the target version
///
/// With an explicit path, it only has to exist. Otherwise the bundle
/// directory is globbed for `*<version>*.msi`; on multiple matches the
/// lexically first wins and the ambiguity is surfaced as a warning rather
/// than resolved by a best-match guess.
pub fn resolve_artifact(
  root: &Path,
  version: &str,
  explicit: Option<&Path>,
  bundle_dir: &Path,
) -> ShipResult<PathBuf> {
  if let Some(explicit) = explicit {
    let candidate = absolute(root, explicit);
    if !candidate.exists() {
      return Err(ShipError::ArtifactNotFound { path: candidate });
    }
    return Ok(candidate);
  }

  let search_dir = absolute(root, bundle_dir);
  if !search_dir.is_dir() {
    return Err(ShipError::ArtifactNotFound { path: search_dir });
  }

  let pattern = format!("{}/*{}*.{}", search_dir.display(), version, INSTALLER_EXT);
  let mut matches: Vec<PathBuf> = glob::glob(&pattern)
    .with_context(|| format!("Invalid artifact pattern {}", pattern))?
    .filter_map(Result::ok)
    .collect();
  matches.sort();

  if matches.is_empty() {
    return Err(ShipError::NoArtifactMatch {
      version: version.to_string(),
      dir: search_dir,
    });
  }
  if matches.len() > 1 {
    println!("⚠️  {} installers match '{}'; using the lexically first", matches.len(), version);
  }

  Ok(matches.remove(0))
}

/// Path of the detached signature next to an installer
pub fn signature_path(artifact: &Path) -> PathBuf {
  let mut name = artifact.as_os_str().to_os_string();
  name.push(".sig");
  PathBuf::from(name)
}

/// Read the detached signature that must accompany the installer
///
/// The content is used verbatim after trimming; no cryptographic
/// verification happens here. An installer without a signature cannot be
/// published, so absence is fatal.
pub fn read_signature(artifact: &Path) -> ShipResult<String> {
  let sig_path = signature_path(artifact);
  if !sig_path.exists() {
    return Err(ShipError::SignatureMissing { path: sig_path });
  }

  let content = std::fs::read_to_string(&sig_path)
    .with_context(|| format!("Failed to read {}", sig_path.display()))?;
  Ok(content.trim().to_string())
}

fn absolute(root: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  }
}
