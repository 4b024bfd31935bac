//! `apimock` application entry point.
//!
//! This binary stages, validates and pushes APIMock configuration bundles. It
//! uses `eyre` for opaque error handling at the application boundary; command
//! failures are rendered as a single `[ERROR]` line through the reporter.
//!
//! Tool settings are loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/apimock/config.toml` or path from `APIMOCK_CONFIG_PATH`)
//! 3. Environment variables (`APIMOCK_*`)
//! 4. Command-line arguments

use std::process::ExitCode;

use apimock::api::{self, PushParams};
use apimock::bundle::StagingDir;
use apimock::config::{AppConfig, Cli, Commands, load_config};
use apimock::device::{AdbBridge, AdbResolver, TerminalPrompt};
use apimock::error::Result as ApiMockResult;
use apimock::reporter::Reporter;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Loads configuration with layered precedence via `OrthoConfig`, then
/// dispatches to the subcommand. A failed command is reported through the
/// reporter and turned into a non-zero exit status.
fn main() -> EyreResult<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;

    let verbose = cli.command.bundle_args().verbose || config.verbose;
    let mut reporter = Reporter::stdout(verbose);

    match run(&cli, &config, &mut reporter) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            tracing::debug!(?error, "command failed");
            reporter.error(&error);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Diagnostics go to stderr and stay silent unless `RUST_LOG` asks for them.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the CLI command, returning domain-specific errors.
fn run(cli: &Cli, config: &AppConfig, reporter: &mut Reporter) -> ApiMockResult<()> {
    match &cli.command {
        Commands::Init(args) => api::init(&args.dir, reporter).map(drop),
        Commands::Clean(args) => api::clean(&args.dir, reporter),
        Commands::Push(args) => {
            let staging = StagingDir::resolve(&args.dir)?;
            let env = mockable::DefaultEnv::new();
            let program = AdbResolver::new(&env).resolve(config.adb_path.as_deref());
            let bridge = AdbBridge::new(program);
            let mut prompt = TerminalPrompt::stdio();
            let summary = api::push(PushParams {
                staging: &staging,
                bridge: &bridge,
                prompt: &mut prompt,
                reporter,
            })?;
            tracing::debug!(serial = summary.serial(), "bundle pushed");
            Ok(())
        }
    }
}
