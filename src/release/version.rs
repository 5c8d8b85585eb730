//! Target version and publish timestamp validation
//!
//! Runs before any manifest is touched so an invalid input aborts the whole
//! run without mutating anything.

use crate::core::error::{ShipError, ShipResult};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.-]+)?$").expect("semver regex"));

/// Validate the target version against the release semver grammar
///
/// The string is returned unchanged; nothing is coerced or padded.
pub fn ensure_semver(value: &str) -> ShipResult<&str> {
  if SEMVER_RE.is_match(value) {
    Ok(value)
  } else {
    Err(ShipError::InvalidVersion {
      input: value.to_string(),
    })
  }
}

/// Normalize an optional publish timestamp to millisecond-precision UTC
///
/// Accepts RFC3339 input (trailing `Z` or an explicit offset) and
/// timezone-less ISO-8601 datetimes, which are taken as UTC. Without input
/// the current UTC instant is used. Output always ends in `Z`.
pub fn normalize_pub_date(value: Option<&str>) -> ShipResult<String> {
  let normalized = match value {
    Some(raw) => parse_utc(raw.trim())?,
    None => Utc::now(),
  };
  Ok(normalized.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_utc(raw: &str) -> ShipResult<DateTime<Utc>> {
  if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
    return Ok(parsed.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
    return Ok(naive.and_utc());
  }
  Err(ShipError::InvalidTimestamp {
    input: raw.to_string(),
  })
}
