//! Configuration loading with layered precedence.
//!
//! Loads the tool configuration with the precedence order (lowest to highest):
//! application defaults, configuration file, environment variables,
//! command-line arguments.
//!
//! `MergeComposer` is driven by hand rather than through `OrthoConfig::load()`
//! because the clap `Cli` owns subcommand dispatch, and because typed
//! environment values must fail fast instead of being silently ignored.
//!
//! # Environment Variable Handling
//!
//! Environment variables with unparseable values (e.g. `APIMOCK_VERBOSE=maybe`
//! instead of `true`/`false`) return an error immediately. String fields such
//! as `APIMOCK_ADB_PATH` are always accepted.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Boolean value (`true`/`false`). Invalid values return an error.
    Bool,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `APIMOCK_ADB_PATH`).
    env_var: &'static str,
    /// The top-level field the value lands in.
    field: &'static str,
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and the fields they set.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "APIMOCK_ADB_PATH",
        field: "adb_path",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "APIMOCK_VERBOSE",
        field: "verbose",
        var_type: EnvVarType::Bool,
    },
];

/// Returns the list of environment variable names recognised by the loader.
///
/// Tests use this to clear every `APIMOCK_*` variable the loader reads.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Read a TOML settings file and push it to the composer.
///
/// The parent directory is opened with ambient authority and the file is read
/// through that capability.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Locate the settings file: an existing `--config` path wins, otherwise the
/// standard discovery candidates are tried in order.
fn discover_config_path(cli: &Cli) -> Option<Utf8PathBuf> {
    cli.config.clone().filter(|p| p.exists()).or_else(|| {
        let discovery = ConfigDiscovery::builder("apimock")
            .env_var("APIMOCK_CONFIG_PATH")
            .config_file_name("config.toml")
            .dotfile_name(".apimock.toml")
            .build();
        discovery
            .candidates()
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Utf8PathBuf::try_from(p).ok())
    })
}

/// Load configuration with full layer precedence.
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - Malformed configuration files
/// - Invalid typed environment variable values (e.g. a non-boolean
///   `APIMOCK_VERBOSE`)
/// - Layer merging failures reported by `ortho_config`
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    if let Some(ref path) = discover_config_path(cli) {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    Ok(config)
}

/// Collect `APIMOCK_*` environment variables into a JSON object.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed environment variable has an
/// unparseable value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::Bool => match raw_value.parse::<bool>() {
                Ok(b) => Value::Bool(b),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected bool (true/false), got '{raw_value}'"),
                    }
                    .into());
                }
            },
        };

        root.insert(spec.field.to_owned(), json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Build a JSON value containing CLI overrides.
///
/// `-v` is per-subcommand and is combined with the merged `verbose` setting by
/// the caller, so only `--adb` is layered here.
fn build_cli_overrides(cli: &Cli) -> Value {
    cli.adb.as_ref().map_or(Value::Null, |adb| {
        let mut overrides = Map::new();
        overrides.insert(String::from("adb_path"), Value::String(adb.clone()));
        Value::Object(overrides)
    })
}
