//! Creating and removing bundle artifacts in a staging directory.
//!
//! Both operations are lenient: an artifact that already exists (for
//! `initialize`) or is already gone (for `clean`) is reported and skipped
//! rather than treated as a failure.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Metadata;
use cap_std::fs_utf8::Dir;

use super::{BundleTemplate, CONFIG_FILE_NAME, MOCK_DIR_NAME, StagingDir};
use crate::error::{FilesystemError, Result};
use crate::reporter::Reporter;

/// Write the default `config.json` and create `mock/` under `staging`.
///
/// An existing `config.json` is never overwritten, so user edits survive a
/// second `init`. The staging directory is created when missing.
///
/// # Errors
///
/// Returns `FilesystemError::IoError` when the staging directory cannot be
/// created or an artifact cannot be written.
pub fn initialize<W: Write>(staging: &StagingDir, reporter: &mut Reporter<W>) -> Result<()> {
    reporter.info(format_args!(
        "Generating config files at {}",
        staging.root()
    ));

    let dir = Dir::create_ambient_dir_all(staging.root(), ambient_authority())
        .and_then(|()| Dir::open_ambient_dir(staging.root(), ambient_authority()))
        .map_err(|error| io_failure(staging.root(), &error))?;

    let config_file = staging.paths().config_file();
    if entry(&dir, CONFIG_FILE_NAME)
        .map_err(|error| io_failure(config_file, &error))?
        .is_some()
    {
        reporter.warning(format_args!("Found {CONFIG_FILE_NAME} exist."));
    } else {
        reporter.info(format_args!("Create {config_file}."));
        let contents = BundleTemplate::default()
            .to_pretty_json()
            .map_err(|error| FilesystemError::IoError {
                path: config_file.to_path_buf(),
                message: error.to_string(),
            })?;
        dir.write(CONFIG_FILE_NAME, contents)
            .map_err(|error| io_failure(config_file, &error))?;
    }

    let mock_dir = staging.paths().mock_dir();
    if entry(&dir, MOCK_DIR_NAME)
        .map_err(|error| io_failure(mock_dir, &error))?
        .is_some()
    {
        reporter.warning(format_args!("Found directory {MOCK_DIR_NAME} exist."));
    } else {
        reporter.info(format_args!("Create directory {MOCK_DIR_NAME}."));
        dir.create_dir_all(MOCK_DIR_NAME)
            .map_err(|error| io_failure(mock_dir, &error))?;
    }

    reporter.message("Init completed.");
    Ok(())
}

/// Remove `config.json` and the `mock/` directory from `staging`.
///
/// The mock directory is removed together with everything inside it. Each
/// removal is announced with a WARNING line first.
///
/// # Errors
///
/// Returns `FilesystemError::IoError` when an existing artifact cannot be
/// removed.
pub fn clean<W: Write>(staging: &StagingDir, reporter: &mut Reporter<W>) -> Result<()> {
    let dir = match Dir::open_ambient_dir(staging.root(), ambient_authority()) {
        Ok(dir) => dir,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(root = %staging.root(), "staging directory absent; nothing to clean");
            reporter.message("Clean complete.");
            return Ok(());
        }
        Err(error) => return Err(io_failure(staging.root(), &error).into()),
    };

    let paths = staging.paths();
    let config_file = paths.config_file();
    if entry(&dir, CONFIG_FILE_NAME)
        .map_err(|error| io_failure(config_file, &error))?
        .is_some()
    {
        reporter.warning(format_args!("Removing {config_file}"));
        dir.remove_file(CONFIG_FILE_NAME)
            .map_err(|error| io_failure(config_file, &error))?;
    }

    let mock_dir = paths.mock_dir();
    if let Some(metadata) =
        entry(&dir, MOCK_DIR_NAME).map_err(|error| io_failure(mock_dir, &error))?
    {
        reporter.warning(format_args!("Removing directory {mock_dir}"));
        // A symlinked mock directory is unlinked; its target is left alone.
        let removed = if metadata.file_type().is_symlink() {
            dir.remove_file(MOCK_DIR_NAME)
        } else {
            dir.remove_dir_all(MOCK_DIR_NAME)
        };
        removed.map_err(|error| io_failure(mock_dir, &error))?;
    }

    reporter.message("Clean complete.");
    Ok(())
}

/// Metadata of `name` itself, without following a final symlink.
///
/// Links are reported even when they point outside `dir` or dangle.
fn entry(dir: &Dir, name: &str) -> io::Result<Option<Metadata>> {
    match dir.symlink_metadata(name) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

fn io_failure(path: &Utf8Path, error: &io::Error) -> FilesystemError {
    FilesystemError::IoError {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
