//! The release pipeline
//!
//! Strictly sequential stages; the first error aborts the run. There is no
//! rollback: manifest bumps before a failed build leave version strings
//! ahead of the build output, and re-running after the fix is the recovery
//! path (bumping to the same version again is harmless).

use crate::core::config::ReleaseConfig;
use crate::core::error::{ShipError, ShipResult};
use crate::core::vcs::SystemGit;
use crate::release::{artifact, build, feed, hosting, manifests, version};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of a completed run, printed as text or JSON
#[derive(Debug, Serialize)]
pub struct ReleaseSummary {
  pub version: String,
  pub pub_date: String,
  pub artifact: PathBuf,
  pub feed: PathBuf,
  pub release_created: bool,
  pub pushed: bool,
}

/// Run the whole pipeline for one release
pub fn run_release(root: &Path, config: &ReleaseConfig, json: bool) -> ShipResult<()> {
  // Stage 1: validate everything before any file is touched
  let target = version::ensure_semver(&config.version)?;
  let pub_date = version::normalize_pub_date(config.pub_date.as_deref())?;

  // Stage 2: version propagation across the three manifests
  let package_path = root.join("package.json");
  let cargo_path = root.join("src-tauri").join("Cargo.toml");
  let tauri_conf_path = root.join("src-tauri").join("tauri.conf.json");

  println!("Updating package.json, Cargo.toml, and tauri.conf.json ...");
  let old_package = manifests::update_json_manifest(&package_path, target, "    ")?;
  let old_cargo = manifests::update_toml_manifest(&cargo_path, target)?;
  let old_tauri = manifests::update_json_manifest(&tauri_conf_path, target, "  ")?;
  println!(
    "Versions bumped from {}/{}/{} to {}",
    old_package.as_deref().unwrap_or("?"),
    old_cargo,
    old_tauri.as_deref().unwrap_or("?"),
    target
  );

  // Stage 3: build
  if config.skip_build {
    println!("Skipping build step as requested.");
  } else {
    build::run_build(root)?;
  }

  // Stage 4: installer and signature
  let artifact_path =
    artifact::resolve_artifact(root, target, config.artifact_path.as_deref(), &config.bundle_dir)?;
  let signature = artifact::read_signature(&artifact_path)?;
  let artifact_name = artifact_path
    .file_name()
    .and_then(|name| name.to_str())
    .map(String::from)
    .ok_or_else(|| ShipError::message(format!("Unusable installer name: {}", artifact_path.display())))?;

  // Stage 5: update feed. The remote-derived base only matters when the feed
  // holds no hosted-release URL yet (rule 3), so failures here are ignored.
  let feed_path = if config.feed_path.is_absolute() {
    config.feed_path.clone()
  } else {
    root.join(&config.feed_path)
  };
  let fallback_base = SystemGit::open(root)
    .ok()
    .and_then(|git| git.remote_https_base().ok().flatten());

  feed::update_feed(
    &feed_path,
    &feed::FeedUpdate {
      version: target,
      notes: &config.notes,
      pub_date: &pub_date,
      signature: &signature,
      artifact_name: &artifact_name,
      download_base: config.download_base.as_deref(),
      fallback_base: fallback_base.as_deref(),
    },
  )?;
  println!("Updated {} for version {}", feed_path.display(), target);

  // Stage 6: hosted release
  let mut release_created = false;
  if config.skip_release {
    println!("Skipping hosted release as requested.");
  } else {
    let gh = hosting::HostingCli::locate()?;
    let tag = format!("v{}", target);
    let title = format!("Release v{}", target);
    let sig_path = artifact::signature_path(&artifact_path);
    let mut assets: Vec<&Path> = vec![&artifact_path];
    if sig_path.exists() {
      assets.push(&sig_path);
    }
    gh.create_release(root, &tag, &title, &config.notes, &assets)?;
    println!("Created hosted release {}", tag);
    release_created = true;
  }

  // Stage 7: commit and push the feed
  let mut pushed = false;
  if config.skip_push {
    println!("Skipping feed push as requested.");
  } else {
    let git = SystemGit::open(root)?;
    if git.has_changes(&feed_path)? {
      git.stage(&feed_path)?;
      git.commit(&format!("chore(release): update {} for v{}", config.feed_path.display(), target))?;
      git.push()?;
      println!("Pushed {} to the remote", config.feed_path.display());
      pushed = true;
    } else {
      println!("{} unchanged; nothing to commit.", config.feed_path.display());
    }
  }

  let summary = ReleaseSummary {
    version: target.to_string(),
    pub_date,
    artifact: artifact_path,
    feed: feed_path,
    release_created,
    pushed,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    print_summary(&summary);
  }

  Ok(())
}

fn print_summary(summary: &ReleaseSummary) {
  println!();
  println!("✅ Release {} complete", summary.version);
  println!("   Installer: {}", summary.artifact.display());
  println!("   Feed:      {}", summary.feed.display());
  if !summary.release_created {
    println!("   Hosted release skipped; upload the installer and .sig when creating it.");
  }
  if !summary.pushed {
    println!("   Feed not pushed; commit and push it when ready.");
  }
}
