//! Tool settings and command-line definitions for apimock.
//!
//! The bundle's own `config.json` is data handled by [`crate::bundle`]. This
//! module configures the helper itself: which `adb` executable to drive and
//! whether to print INFO lines. Loading and precedence merging is handled by
//! the `ortho_config` crate. Precedence: CLI flags override environment
//! variables, which override configuration files, which override defaults.
//!
//! The configuration file is expected at `~/.config/apimock/config.toml` by
//! default.
//!
//! # Example Configuration
//!
//! ```toml
//! adb_path = "/opt/android-sdk/platform-tools/adb"
//! verbose = true
//! ```

mod cli;
mod loader;
mod types;


pub use cli::{BundleArgs, Cli, Commands};
pub use loader::{env_var_names, load_config};
pub use types::AppConfig;
