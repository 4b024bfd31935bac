//! Semantic error types for the apimock helper.
//!
//! This module defines the error hierarchy for apimock, following the principle
//! of using semantic error enums (via `thiserror`) for conditions the caller
//! might inspect, while reserving opaque errors (`eyre::Report`) for the
//! application boundary.
//!
//! Every variant renders as a single human-readable line. The binary reports a
//! failed command by writing that line at ERROR severity and exiting non-zero.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while validating a configuration bundle before a push.
///
/// Validation is fail-fast: the first offending check produces exactly one of
/// these variants and no later checks run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The configuration file or a referenced mock file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was expected to exist.
        path: Utf8PathBuf,
    },

    /// A file exists but does not contain valid JSON.
    #[error("Invalid JSON format: {path}")]
    MalformedJson {
        /// The path of the malformed file.
        path: Utf8PathBuf,
        /// The parser's description of the problem.
        message: String,
    },

    /// The `remote` field is missing, empty, or not a string.
    #[error("Invalid value of \"remote\" in {file_name}")]
    MissingRemote {
        /// File name of the configuration that lacks a usable `remote`.
        file_name: String,
    },

    /// A `route` key does not compile as a regular expression.
    #[error("Invalid regex: {pattern}")]
    InvalidRegex {
        /// The offending pattern, verbatim.
        pattern: String,
    },

    /// The `route` table or one of its entries has the wrong JSON shape.
    #[error("Invalid route entry '{key}': {reason}")]
    InvalidRoute {
        /// The route key (or `route` itself when the table is malformed).
        key: String,
        /// What is wrong with the entry.
        reason: String,
    },

    /// The configuration file could not be read even though it exists.
    #[error("failed to read {path}: {message}")]
    Unreadable {
        /// The path that could not be read.
        path: Utf8PathBuf,
        /// A description of the I/O failure.
        message: String,
    },
}

/// Errors raised while discovering, selecting or pushing to a device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No device in the `device` state is attached.
    #[error("No devices.")]
    NoDevices,

    /// The user's device choice was not a valid index.
    #[error("Invalid input! expected an index between 0 and {max_index}, got '{input}'")]
    InvalidSelection {
        /// The raw text the user entered.
        input: String,
        /// The largest acceptable index.
        max_index: usize,
    },

    /// The selection prompt could not be displayed or read.
    #[error("failed to read device selection: {message}")]
    PromptFailed {
        /// A description of the terminal failure.
        message: String,
    },

    /// The device bridge program could not be started or listed no devices.
    #[error("device bridge '{program}' is unavailable: {message}")]
    BridgeUnavailable {
        /// The bridge executable that was invoked.
        program: String,
        /// A description of the failure.
        message: String,
    },

    /// Copying a file or directory onto the device failed.
    #[error("failed to push '{local}' to [{serial}] {remote}: {message}")]
    TransferFailed {
        /// Serial of the target device.
        serial: String,
        /// Local source path.
        local: Utf8PathBuf,
        /// Destination path on the device.
        remote: Utf8PathBuf,
        /// A description of the transfer failure.
        message: String,
    },
}

/// Errors that can occur while loading the tool's own settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A settings value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors that can occur during local filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// An I/O error occurred.
    #[error("I/O error at '{path}': {message}")]
    IoError {
        /// The path where the error occurred.
        path: Utf8PathBuf,
        /// A description of the I/O error.
        message: String,
    },

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },
}

/// Top-level error type for the apimock helper.
#[derive(Debug, Error)]
pub enum ApiMockError {
    /// The bundle failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Device discovery, selection or transfer failed.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// The tool configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A local filesystem operation failed.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// A specialised `Result` type for apimock operations.
pub type Result<T> = std::result::Result<T, ApiMockError>;
