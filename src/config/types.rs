//! Configuration data types for apimock.

use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

/// Root tool configuration.
///
/// Loaded from configuration files, environment variables and command-line
/// arguments with layered precedence (lowest to highest): defaults,
/// configuration file, environment variables, command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `APIMOCK_CONFIG_PATH` environment variable
/// 2. `.apimock.toml` in the current working directory
/// 3. `.apimock.toml` in the home directory
/// 4. `~/.config/apimock/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "APIMOCK",
    post_merge_hook,
    discovery(
        app_name = "apimock",
        env_var = "APIMOCK_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".apimock.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// Explicit path to the `adb` executable.
    ///
    /// When unset, the bridge looks under `ANDROID_HOME` and
    /// `ANDROID_SDK_ROOT` before falling back to `adb` on `PATH`.
    pub adb_path: Option<String>,

    /// Show INFO lines even without `-v`.
    #[serde(default)]
    pub verbose: bool,
}

impl PostMergeHook for AppConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.adb_path = normalise_adb_path(self.adb_path.take());
        Ok(())
    }
}

/// Trim an `adb_path` value, treating blank strings as unset.
pub(crate) fn normalise_adb_path(raw: Option<String>) -> Option<String> {
    raw.map(|path| path.trim().to_owned())
        .filter(|path| !path.is_empty())
}
