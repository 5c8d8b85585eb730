//! Update-feed mutation and download-URL rewriting
//!
//! The feed is the JSON document an auto-updater polls:
//! `{version, notes, pub_date, platforms: {<id>: {signature, url}}}`.
//! One platform key is updated per run; other platform entries are left
//! untouched.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use crate::release::manifests::write_json;
use serde_json::{Map, Value};
use std::path::Path;

/// Platform key mutated by this pipeline
pub const PLATFORM: &str = "windows-x86_64";

/// Path segment marking a hosted-release download URL
const RELEASE_MARKER: &str = "/releases/download/";

/// Hosting base used when neither an override nor a recognizable existing
/// URL nor a git remote is available
const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com/acme/cooler";

/// Everything the feed mutation needs from the earlier stages
pub struct FeedUpdate<'a> {
  pub version: &'a str,
  pub notes: &'a str,
  pub pub_date: &'a str,
  pub signature: &'a str,
  pub artifact_name: &'a str,
  /// Explicit base override from the CLI (precedence rule 1)
  pub download_base: Option<&'a str>,
  /// HTTPS base derived from the git remote (precedence rule 3)
  pub fallback_base: Option<&'a str>,
}

/// Rewrite the update feed in place for a new release
pub fn update_feed(path: &Path, update: &FeedUpdate<'_>) -> ShipResult<()> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let mut data: Value =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

  let feed = data
    .as_object_mut()
    .ok_or_else(|| ShipError::message(format!("{} is not a JSON object", path.display())))?;

  feed.insert("version".to_string(), Value::String(update.version.to_string()));
  feed.insert("notes".to_string(), Value::String(update.notes.to_string()));
  feed.insert("pub_date".to_string(), Value::String(update.pub_date.to_string()));

  let platforms = feed
    .entry("platforms")
    .or_insert_with(|| Value::Object(Map::new()))
    .as_object_mut()
    .ok_or_else(|| ShipError::message(format!("'platforms' in {} is not an object", path.display())))?;

  let entry = platforms
    .entry(PLATFORM)
    .or_insert_with(|| Value::Object(Map::new()))
    .as_object_mut()
    .ok_or_else(|| ShipError::message(format!("'{}' entry in {} is not an object", PLATFORM, path.display())))?;

  let current_url = entry.get("url").and_then(Value::as_str).unwrap_or("");
  let url = rewrite_download_url(
    current_url,
    update.version,
    update.artifact_name,
    update.download_base,
    update.fallback_base,
  );

  entry.insert("signature".to_string(), Value::String(update.signature.to_string()));
  entry.insert("url".to_string(), Value::String(url));

  write_json(path, &data, "    ")
}

/// Compute the platform download URL
///
/// Precedence, first match wins:
/// 1. explicit override base + `vVERSION/artifact`
/// 2. existing URL with a `/releases/download/` marker: keep everything
///    before the marker as the base and recompose the tail, so no stale
///    version substring can survive anywhere in the path
/// 3. synthesize from the fallback hosting base
pub fn rewrite_download_url(
  current_url: &str,
  version: &str,
  artifact_name: &str,
  override_base: Option<&str>,
  fallback_base: Option<&str>,
) -> String {
  if let Some(base) = override_base {
    return format!("{}/v{}/{}", base.trim_end_matches('/'), version, artifact_name);
  }

  if let Some(idx) = current_url.find(RELEASE_MARKER) {
    let base = &current_url[..idx];
    return format!("{}{}v{}/{}", base, RELEASE_MARKER, version, artifact_name);
  }

  let base = fallback_base.unwrap_or(DEFAULT_DOWNLOAD_BASE);
  format!("{}{}v{}/{}", base.trim_end_matches('/'), RELEASE_MARKER, version, artifact_name)
}
