//! Validate-then-transfer orchestration for `push`.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::bundle::{BundlePaths, StagingDir, validate};
use crate::device::{Device, DeviceBridge, SelectionPrompt, select_device};
use crate::error::Result as ApiMockResult;
use crate::reporter::Reporter;

/// Parameters for pushing a staged bundle to a device.
///
/// Groups the collaborators required by [`push`] into a single struct to
/// satisfy the "no more than four parameters" convention.
pub struct PushParams<'a, B, P, W>
where
    B: DeviceBridge + ?Sized,
    P: SelectionPrompt + ?Sized,
    W: Write,
{
    /// The staged bundle to validate and transfer.
    pub staging: &'a StagingDir,
    /// Device discovery and transfer capability.
    pub bridge: &'a B,
    /// Asked to choose when several devices are attached.
    pub prompt: &'a mut P,
    /// Progress sink.
    pub reporter: &'a mut Reporter<W>,
}

/// What a push delivered, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSummary {
    device: Device,
    remote_config_file: Utf8PathBuf,
    remote_mock_dir: Utf8PathBuf,
}

impl PushSummary {
    /// Plan a push of the bundle to `remote` on `device`.
    ///
    /// The remote layout mirrors the local one: `<remote>/config.json` and
    /// `<remote>/mock`.
    #[must_use]
    pub fn plan(device: Device, remote: &Utf8Path) -> Self {
        let (remote_config_file, remote_mock_dir) = BundlePaths::derive(remote).into_parts();
        Self {
            device,
            remote_config_file,
            remote_mock_dir,
        }
    }

    /// The device that received the bundle.
    #[must_use]
    pub const fn device(&self) -> &Device {
        &self.device
    }

    /// Serial of the device that received the bundle.
    #[must_use]
    pub fn serial(&self) -> &str {
        self.device.serial()
    }

    /// Destination of `config.json` on the device.
    #[must_use]
    pub fn remote_config_file(&self) -> &Utf8Path {
        &self.remote_config_file
    }

    /// Destination of the mock directory on the device.
    #[must_use]
    pub fn remote_mock_dir(&self) -> &Utf8Path {
        &self.remote_mock_dir
    }
}

/// Validate the staged bundle, choose a device and transfer the bundle.
///
/// Nothing touches the device until validation has passed. Device selection
/// happens after validation so a broken bundle never prompts.
///
/// # Errors
///
/// Returns the first failure encountered:
/// - `ValidationError` variants when the bundle is invalid.
/// - `DeviceError::NoDevices`, `InvalidSelection` or `PromptFailed` when no
///   device could be chosen.
/// - `DeviceError::BridgeUnavailable` or `TransferFailed` when `adb` fails.
pub fn push<B, P, W>(params: PushParams<'_, B, P, W>) -> ApiMockResult<PushSummary>
where
    B: DeviceBridge + ?Sized,
    P: SelectionPrompt + ?Sized,
    W: Write,
{
    let PushParams {
        staging,
        bridge,
        prompt,
        reporter,
    } = params;

    let paths = staging.paths();
    let remote = validate(paths.config_file(), staging.root())?;
    tracing::debug!(%remote, root = %staging.root(), "bundle validated");

    let device = select_device(bridge.list_devices()?, prompt)?;
    let summary = PushSummary::plan(device, &remote);

    reporter.info(format_args!(
        "Pushing configs to [{}] {remote} ...",
        summary.serial()
    ));
    transfer(bridge, paths, &summary, reporter)?;

    reporter.message("Push completed!");
    Ok(summary)
}

/// Copy the config file and then the mock directory as planned in `summary`.
///
/// The first failed copy aborts the transfer. Nothing already copied is
/// rolled back.
///
/// # Errors
///
/// Returns `DeviceError::TransferFailed` or `DeviceError::BridgeUnavailable`
/// from the bridge.
pub fn transfer<B, W>(
    bridge: &B,
    local: &BundlePaths,
    summary: &PushSummary,
    reporter: &mut Reporter<W>,
) -> ApiMockResult<()>
where
    B: DeviceBridge + ?Sized,
    W: Write,
{
    let copies = [
        (local.config_file(), summary.remote_config_file()),
        (local.mock_dir(), summary.remote_mock_dir()),
    ];
    for (source, destination) in copies {
        bridge.push(summary.device(), source, destination)?;
        reporter.info(format_args!("Pushed {source} to {destination}"));
    }
    Ok(())
}
