//! Command-line argument definitions for apimock.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Command-line interface for apimock.
#[derive(Debug, Parser)]
#[command(name = "apimock")]
#[command(
    author,
    version,
    about = "Generate, validate and push APIMock configuration to Android devices"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the helper's own settings file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// The adb executable to use.
    #[arg(long, global = true)]
    pub adb: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate default config files.
    Init(BundleArgs),

    /// Push configs to an Android device.
    Push(BundleArgs),

    /// Remove config files.
    Clean(BundleArgs),
}

impl Commands {
    /// Arguments shared by every subcommand.
    #[must_use]
    pub const fn bundle_args(&self) -> &BundleArgs {
        match self {
            Self::Init(args) | Self::Push(args) | Self::Clean(args) => args,
        }
    }
}

/// Arguments shared by `init`, `push` and `clean`.
#[derive(Debug, Clone, Args)]
pub struct BundleArgs {
    /// The location of config files.
    #[arg(short = 'd', long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: Utf8PathBuf,

    /// Print more text.
    #[arg(short, long)]
    pub verbose: bool,
}
