//! Orchestration API for apimock commands.
//!
//! This module provides one orchestration function per command: [`init`],
//! [`push`] and [`clean`]. They hold the business logic behind the CLI binary
//! so that library embedders and tests can drive the same flows.
//!
//! All functions accept library-owned types (not clap types), report progress
//! through a [`Reporter`], and return [`crate::error::Result`]. Failures are
//! returned rather than printed; the caller decides how to render them.

mod push;

use std::io::Write;

use camino::Utf8Path;

pub use push::{PushParams, PushSummary, push, transfer};

use crate::bundle::{self, StagingDir};
use crate::error::Result as ApiMockResult;
use crate::reporter::Reporter;

/// Stage a fresh bundle in `dir`.
///
/// # Errors
///
/// Returns `FilesystemError` when `dir` cannot be resolved or the bundle
/// artifacts cannot be written.
pub fn init<W: Write>(dir: &Utf8Path, reporter: &mut Reporter<W>) -> ApiMockResult<StagingDir> {
    let staging = StagingDir::resolve(dir)?;
    bundle::initialize(&staging, reporter)?;
    Ok(staging)
}

/// Remove the bundle staged in `dir`.
///
/// # Errors
///
/// Returns `FilesystemError` when `dir` cannot be resolved or an existing
/// artifact cannot be removed.
pub fn clean<W: Write>(dir: &Utf8Path, reporter: &mut Reporter<W>) -> ApiMockResult<()> {
    let staging = StagingDir::resolve(dir)?;
    bundle::clean(&staging, reporter)
}
