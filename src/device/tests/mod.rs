//! Unit tests for device discovery and selection.


use rstest::fixture;

use super::Device;

/// Two attached devices, in `adb` listing order.
#[fixture]
pub(super) fn two_devices() -> Vec<Device> {
    vec![
        Device::new("emulator-5554", "sdk_gphone64_x86_64"),
        Device::new("0A1B2C3D4E", "Pixel_7"),
    ]
}
