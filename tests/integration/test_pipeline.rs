//! End-to-end pipeline tests (build, hosted release, and push skipped)

use crate::helpers::{TestProject, run_shipway, try_shipway};
use anyhow::Result;

#[test]
fn test_full_run_with_prebuilt_installer() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  run_shipway(
    &project.path,
    &[
      "0.5.0",
      "--notes",
      "fix widget bug",
      "--skip-build",
      "--skip-release",
      "--skip-push",
    ],
  )?;

  // All three manifests carry the new version
  assert!(project.read_file("package.json")?.contains("\"version\": \"0.5.0\""));
  assert!(project.read_file("src-tauri/Cargo.toml")?.contains("version = \"0.5.0\""));
  assert!(project.read_file("src-tauri/tauri.conf.json")?.contains("\"version\": \"0.5.0\""));

  // The dependency spec in Cargo.toml is untouched
  assert!(project.read_file("src-tauri/Cargo.toml")?.contains("serde = { version = \"1.0\" }"));

  // Feed: version, notes, signature, and a rewritten URL
  let feed = project.feed()?;
  assert_eq!(feed["version"], "0.5.0");
  assert_eq!(feed["notes"], "fix widget bug");
  assert_eq!(feed["platforms"]["windows-x86_64"]["signature"], "SIGDATA");
  assert_eq!(
    feed["platforms"]["windows-x86_64"]["url"],
    "https://github.com/acme/cooler/releases/download/v0.5.0/App_0.5.0_x64.msi"
  );

  // Fresh UTC timestamp with trailing Z
  let pub_date = feed["pub_date"].as_str().unwrap();
  assert!(pub_date.ends_with('Z'), "pub_date should end in Z, got {}", pub_date);
  assert!(!pub_date.contains("+00:00"));

  Ok(())
}

#[test]
fn test_explicit_artifact_path() -> Result<()> {
  let project = TestProject::new()?;
  let artifact = project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  run_shipway(
    &project.path,
    &[
      "0.5.0",
      "--notes",
      "fix widget bug",
      "--skip-build",
      "--artifact",
      artifact.to_str().unwrap(),
      "--skip-release",
      "--skip-push",
    ],
  )?;

  let feed = project.feed()?;
  assert_eq!(
    feed["platforms"]["windows-x86_64"]["url"],
    "https://github.com/acme/cooler/releases/download/v0.5.0/App_0.5.0_x64.msi"
  );

  Ok(())
}

#[test]
fn test_download_base_override() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  run_shipway(
    &project.path,
    &[
      "0.5.0",
      "--notes",
      "mirror release",
      "--skip-build",
      "--skip-release",
      "--skip-push",
      "--download-base",
      "https://mirror.example.org/downloads",
    ],
  )?;

  let feed = project.feed()?;
  assert_eq!(
    feed["platforms"]["windows-x86_64"]["url"],
    "https://mirror.example.org/downloads/v0.5.0/App_0.5.0_x64.msi"
  );

  Ok(())
}

#[test]
fn test_ambiguous_installers_warn_and_pick_first() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("B_0.5.0_x64.msi", "SIGB")?;
  project.add_installer("A_0.5.0_x64.msi", "SIGA")?;

  let output = run_shipway(
    &project.path,
    &["0.5.0", "--notes", "n", "--skip-build", "--skip-release", "--skip-push"],
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("lexically first"), "should warn about ambiguity, got: {}", stdout);

  let feed = project.feed()?;
  assert_eq!(feed["platforms"]["windows-x86_64"]["signature"], "SIGA");
  let url = feed["platforms"]["windows-x86_64"]["url"].as_str().unwrap();
  assert!(url.ends_with("v0.5.0/A_0.5.0_x64.msi"));

  Ok(())
}

#[test]
fn test_invalid_version_aborts_before_any_mutation() -> Result<()> {
  let project = TestProject::new()?;

  let output = try_shipway(&project.path, &["1.2", "--notes", "n", "--skip-build"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid version"), "got: {}", stderr);

  // Nothing was touched
  assert!(project.read_file("package.json")?.contains("\"version\": \"0.4.3\""));
  assert_eq!(project.feed()?["version"], "0.4.3");

  Ok(())
}

#[test]
fn test_no_matching_installer_fails() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.4.3_x64.msi", "OLD")?;

  let output = try_shipway(
    &project.path,
    &["0.5.0", "--notes", "n", "--skip-build", "--skip-release", "--skip-push"],
  )?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("No installer containing '0.5.0'"));

  Ok(())
}

#[test]
fn test_missing_signature_fails() -> Result<()> {
  let project = TestProject::new()?;
  let bundle = project.path.join("src-tauri/target/release/bundle/msi");
  std::fs::create_dir_all(&bundle)?;
  std::fs::write(bundle.join("App_0.5.0_x64.msi"), b"installer bytes")?;

  let output = try_shipway(
    &project.path,
    &["0.5.0", "--notes", "n", "--skip-build", "--skip-release", "--skip-push"],
  )?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("Missing signature file"));

  Ok(())
}

#[test]
fn test_conflicting_notes_sources_fail() -> Result<()> {
  let project = TestProject::new()?;

  let output = try_shipway(
    &project.path,
    &["0.5.0", "--notes", "inline", "--notes-file", "notes.txt", "--skip-build"],
  )?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("not both"));

  Ok(())
}

#[test]
fn test_json_summary_output() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  let output = run_shipway(
    &project.path,
    &["0.5.0", "--notes", "n", "--skip-build", "--skip-release", "--skip-push", "--json"],
  )?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let json_start = stdout.find('{').expect("summary JSON in stdout");
  let summary: serde_json::Value = serde_json::from_str(&stdout[json_start..])?;

  assert_eq!(summary["version"], "0.5.0");
  assert_eq!(summary["release_created"], false);
  assert_eq!(summary["pushed"], false);

  Ok(())
}
