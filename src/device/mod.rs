//! Android device discovery, selection and file transfer.
//!
//! Devices are reached through the [`DeviceBridge`] trait so that the push
//! pipeline can be exercised without hardware. [`AdbBridge`] is the production
//! implementation and drives the `adb` executable located by [`AdbResolver`].
//!
//! When more than one device is attached the user picks one through a
//! [`SelectionPrompt`]; [`TerminalPrompt`] reads the choice from standard
//! input.

mod adb;
mod selection;

#[cfg(test)]
mod tests;

use camino::Utf8Path;

use crate::error::DeviceError;

pub use adb::{AdbBridge, AdbResolver, parse_device_list};
pub use selection::{SelectionPrompt, TerminalPrompt, render_device_table, select_device};

/// An attached Android device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    serial: String,
    model: String,
}

impl Device {
    /// Create a device record.
    #[must_use]
    pub fn new(serial: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            model: model.into(),
        }
    }

    /// Unique serial used to address the device.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Human-readable model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Behaviour required to enumerate devices and copy files onto them.
///
/// This abstraction keeps the push pipeline testable without a device.
pub trait DeviceBridge {
    /// List devices that are ready to receive files.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::BridgeUnavailable` when the bridge cannot be
    /// queried.
    fn list_devices(&self) -> Result<Vec<Device>, DeviceError>;

    /// Copy `local` (a file, or a directory recursively) to `remote` on
    /// `device`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::TransferFailed` when the copy fails, or
    /// `DeviceError::BridgeUnavailable` when the bridge cannot be started.
    fn push(&self, device: &Device, local: &Utf8Path, remote: &Utf8Path)
    -> Result<(), DeviceError>;
}
