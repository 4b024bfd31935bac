//! `adb`-backed device bridge.

use std::process::{Command, Output, Stdio};

use camino::{Utf8Path, Utf8PathBuf};

use super::{Device, DeviceBridge};
use crate::error::DeviceError;

/// Environment variables naming an Android SDK, checked in order.
const SDK_ENV_VARS: &[&str] = &["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// SDK sub-directory holding `adb`.
const PLATFORM_TOOLS_DIR: &str = "platform-tools";

#[cfg(windows)]
const ADB_EXECUTABLE: &str = "adb.exe";

#[cfg(not(windows))]
const ADB_EXECUTABLE: &str = "adb";

/// `adb devices -l` state of a device that accepts commands.
const READY_STATE: &str = "device";

const UNKNOWN_MODEL: &str = "unknown";

/// Resolves which `adb` executable to run.
///
/// Resolution order: an explicitly configured path, then `adb` inside the SDK
/// named by `ANDROID_HOME` or `ANDROID_SDK_ROOT` (when present on disk), then
/// plain `adb` looked up on `PATH`.
///
/// # Type Parameters
///
/// * `E` - An environment provider implementing the `mockable::Env` trait,
///   allowing for testable environment variable access.
pub struct AdbResolver<'a, E: mockable::Env> {
    env: &'a E,
}

impl<'a, E: mockable::Env> AdbResolver<'a, E> {
    /// Creates a new resolver with the given environment provider.
    #[must_use]
    pub const fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Returns the `adb` program to execute.
    #[must_use]
    pub fn resolve(&self, configured: Option<&str>) -> String {
        if let Some(program) = configured.filter(|program| !program.is_empty()) {
            return program.to_owned();
        }
        self.resolve_from_sdk()
            .map_or_else(|| ADB_EXECUTABLE.to_owned(), Utf8PathBuf::into_string)
    }

    /// Returns the first SDK-provided `adb` that exists on disk.
    #[must_use]
    pub fn resolve_from_sdk(&self) -> Option<Utf8PathBuf> {
        SDK_ENV_VARS
            .iter()
            .filter_map(|var_name| self.env.string(var_name))
            .filter(|value| !value.is_empty())
            .map(|sdk_root| {
                Utf8PathBuf::from(sdk_root)
                    .join(PLATFORM_TOOLS_DIR)
                    .join(ADB_EXECUTABLE)
            })
            .find(|candidate| candidate.is_file())
    }
}

/// Device bridge that shells out to `adb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbBridge {
    program: String,
}

impl AdbBridge {
    /// Create a bridge invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this bridge runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[&str]) -> Result<Output, DeviceError> {
        tracing::debug!(program = %self.program, ?args, "invoking adb");
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| DeviceError::BridgeUnavailable {
                program: self.program.clone(),
                message: error.to_string(),
            })
    }
}

impl DeviceBridge for AdbBridge {
    fn list_devices(&self) -> Result<Vec<Device>, DeviceError> {
        let output = self.run(&["devices", "-l"])?;
        if !output.status.success() {
            return Err(DeviceError::BridgeUnavailable {
                program: self.program.clone(),
                message: failure_message(&output),
            });
        }
        Ok(parse_device_list(&String::from_utf8_lossy(&output.stdout)))
    }

    fn push(
        &self,
        device: &Device,
        local: &Utf8Path,
        remote: &Utf8Path,
    ) -> Result<(), DeviceError> {
        let output = self.run(&[
            "-s",
            device.serial(),
            "push",
            local.as_str(),
            remote.as_str(),
        ])?;
        if output.status.success() {
            return Ok(());
        }
        Err(DeviceError::TransferFailed {
            serial: device.serial().to_owned(),
            local: local.to_path_buf(),
            remote: remote.to_path_buf(),
            message: failure_message(&output),
        })
    }
}

/// Prefer stderr, fall back to stdout, then to the exit status.
fn failure_message(output: &Output) -> String {
    [&output.stderr, &output.stdout]
        .into_iter()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_owned())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| format!("adb exited with {}", output.status))
}

/// Parse `adb devices -l` output into the devices that are ready for use.
///
/// Header lines, daemon start-up notices and devices in any state other than
/// `device` (for example `offline` or `unauthorized`) are skipped.
#[must_use]
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output.lines().filter_map(parse_device_line).collect()
}

fn parse_device_line(line: &str) -> Option<Device> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("List of devices") || trimmed.starts_with('*') {
        return None;
    }

    let mut fields = trimmed.split_whitespace();
    let serial = fields.next()?;
    let state = fields.next()?;
    if state != READY_STATE {
        tracing::debug!(%serial, %state, "skipping device that is not ready");
        return None;
    }

    let model = fields
        .find_map(|field| field.strip_prefix("model:"))
        .unwrap_or(UNKNOWN_MODEL);
    Some(Device::new(serial, model))
}
