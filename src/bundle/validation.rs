//! Structural validation of a staged bundle.
//!
//! Validation is fail-fast. Checks run in a fixed order and the first failure
//! is returned; nothing after it is inspected:
//!
//! 1. `config.json` exists and parses as JSON.
//! 2. `remote` is a non-empty string.
//! 3. For each `route` entry, in ascending key order: the key compiles as a
//!    regular expression, and the referenced mock file (resolved against the
//!    staging directory) exists and parses as JSON.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::File;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;

const KEY_REMOTE: &str = "remote";
const KEY_ROUTE: &str = "route";

/// Validate the bundle described by `config_file`.
///
/// Mock file paths in `route` are resolved against `staging_dir`. On success
/// the configured `remote` directory is returned unchanged.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`]:
/// `FileNotFound`, `MalformedJson`, `MissingRemote`, `InvalidRoute`,
/// `InvalidRegex`, or `Unreadable`.
pub fn validate(
    config_file: &Utf8Path,
    staging_dir: &Utf8Path,
) -> Result<Utf8PathBuf, ValidationError> {
    let config = read_json_file(config_file)?;

    let remote = config
        .get(KEY_REMOTE)
        .and_then(Value::as_str)
        .filter(|remote| !remote.is_empty())
        .ok_or_else(|| ValidationError::MissingRemote {
            file_name: config_file
                .file_name()
                .unwrap_or(config_file.as_str())
                .to_owned(),
        })?;

    for (pattern, target) in sorted_routes(config.get(KEY_ROUTE))? {
        check_pattern(pattern)?;
        let mock_file = staging_dir.join(route_target(pattern, target)?);
        read_json_file(&mock_file)?;
        tracing::debug!(%pattern, %mock_file, "route validated");
    }

    Ok(Utf8PathBuf::from(remote))
}

/// Route entries in ascending key order.
///
/// A missing or `null` route table yields no entries.
fn sorted_routes(route: Option<&Value>) -> Result<Vec<(&str, &Value)>, ValidationError> {
    let table = match route {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(table)) => table,
        Some(_) => {
            return Err(ValidationError::InvalidRoute {
                key: String::from(KEY_ROUTE),
                reason: String::from("expected an object of pattern to mock file"),
            });
        }
    };

    Ok(entries_by_key(table))
}

fn entries_by_key(table: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut entries: Vec<(&str, &Value)> = table
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    entries.sort_unstable_by(|left, right| left.0.cmp(right.0));
    entries
}

fn check_pattern(pattern: &str) -> Result<(), ValidationError> {
    Regex::new(pattern)
        .map(drop)
        .map_err(|error| {
            tracing::debug!(%pattern, %error, "route pattern rejected");
            ValidationError::InvalidRegex {
                pattern: pattern.to_owned(),
            }
        })
}

fn route_target<'a>(pattern: &str, target: &'a Value) -> Result<&'a str, ValidationError> {
    target.as_str().ok_or_else(|| ValidationError::InvalidRoute {
        key: pattern.to_owned(),
        reason: format!("expected a mock file path string, got {target}"),
    })
}

/// Read and parse a JSON file, distinguishing absence from bad content.
fn read_json_file(path: &Utf8Path) -> Result<Value, ValidationError> {
    if !path.exists() {
        return Err(ValidationError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = read_to_string(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => ValidationError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => ValidationError::MalformedJson {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
        _ => ValidationError::Unreadable {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
    })?;

    serde_json::from_str(&contents).map_err(|error| ValidationError::MalformedJson {
        path: path.to_path_buf(),
        message: error.to_string(),
    })
}

/// Open `path` with ambient authority, following symlinks as `exists` does.
fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
