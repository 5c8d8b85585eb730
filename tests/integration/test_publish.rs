//! Change-publish stage tests against a local bare remote

use crate::helpers::{TestProject, git, run_shipway};
use anyhow::Result;

#[test]
fn test_feed_committed_and_pushed() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  run_shipway(
    &project.path,
    &["0.5.0", "--notes", "fix widget bug", "--skip-build", "--skip-release"],
  )?;

  // One feed commit beyond the initial setup commit, on the remote
  assert_eq!(project.remote_feed_commits()?, 2);

  let log = git(&project.remote, &["log", "-1", "--format=%s", "main"])?;
  let subject = String::from_utf8_lossy(&log.stdout);
  assert!(subject.contains("v0.5.0"), "commit message should carry the version, got: {}", subject);
  assert!(subject.contains("latest.json"));

  Ok(())
}

#[test]
fn test_rerun_without_feed_delta_is_noop() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  // Pin the timestamp so the second run rewrites the feed byte-identically
  let args = [
    "0.5.0",
    "--notes",
    "fix widget bug",
    "--pub-date",
    "2025-06-01T12:00:00Z",
    "--skip-build",
    "--skip-release",
  ];

  run_shipway(&project.path, &args)?;
  let commits_after_first = project.remote_feed_commits()?;

  let output = run_shipway(&project.path, &args)?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("nothing to commit"), "second run should no-op, got: {}", stdout);

  assert_eq!(project.remote_feed_commits()?, commits_after_first);

  Ok(())
}

#[test]
fn test_skip_push_leaves_feed_uncommitted() -> Result<()> {
  let project = TestProject::new()?;
  project.add_installer("App_0.5.0_x64.msi", "SIGDATA")?;

  run_shipway(
    &project.path,
    &["0.5.0", "--notes", "n", "--skip-build", "--skip-release", "--skip-push"],
  )?;

  assert_eq!(project.remote_feed_commits()?, 1);

  let status = git(&project.path, &["status", "--porcelain", "--", "latest.json"])?;
  assert!(!status.stdout.is_empty(), "feed should be dirty in the working tree");

  Ok(())
}
