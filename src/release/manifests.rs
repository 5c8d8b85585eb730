//! Version propagation across the three manifest files
//!
//! Each update is read-modify-write and returns the prior version for audit
//! logging. Indentation is preserved exactly per manifest since downstream
//! tooling is indentation-sensitive. There is no rollback: re-writing the
//! same version on a re-run is harmless.

use crate::core::error::{ResultExt, ShipError, ShipResult};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use std::sync::LazyLock;

/// First `version = "..."` assignment at the start of a line
static TOML_VERSION_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?m)^(version\s*=\s*)"([^"]+)""#).expect("toml version regex"));

/// Bump the top-level version field of a JSON manifest
///
/// Every sibling field survives, in its original order. A manifest without a
/// version field is tolerated; the prior version is reported as `None`.
pub fn update_json_manifest(path: &Path, version: &str, indent: &str) -> ShipResult<Option<String>> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let mut data: Value =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

  let obj = data
    .as_object_mut()
    .ok_or_else(|| ShipError::message(format!("{} is not a JSON object", path.display())))?;

  let old = obj.get("version").and_then(Value::as_str).map(String::from);
  obj.insert("version".to_string(), Value::String(version.to_string()));

  write_json(path, &data, indent)?;
  Ok(old)
}

/// Replace the first `version = "..."` assignment in a TOML manifest
///
/// The file is treated as plain text so all other content survives
/// byte-for-byte.
pub fn update_toml_manifest(path: &Path, version: &str) -> ShipResult<String> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let caps = TOML_VERSION_RE
    .captures(&content)
    .ok_or_else(|| ShipError::ManifestFieldNotFound {
      path: path.to_path_buf(),
    })?;

  let old = caps[2].to_string();
  let matched = caps.get(0).expect("whole match");

  let mut updated = String::with_capacity(content.len());
  updated.push_str(&content[..matched.start()]);
  updated.push_str(&caps[1]);
  updated.push('"');
  updated.push_str(version);
  updated.push('"');
  updated.push_str(&content[matched.end()..]);

  std::fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(old)
}

/// Serialize a JSON document with the given indentation and a trailing newline
pub fn write_json(path: &Path, data: &Value, indent: &str) -> ShipResult<()> {
  let mut buf = Vec::new();
  let formatter = PrettyFormatter::with_indent(indent.as_bytes());
  let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
  data
    .serialize(&mut serializer)
    .with_context(|| format!("Failed to serialize {}", path.display()))?;
  buf.push(b'\n');

  std::fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(())
}
