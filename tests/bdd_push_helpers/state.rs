//! Scenario state for push behavioural tests.

use std::sync::Arc;

use apimock::device::Device;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;

use super::StepResult;

/// Temporary staging directory used by a scenario.
#[derive(Clone)]
pub(crate) struct StagingRoot {
    /// Keeps the temporary directory alive for the full scenario.
    pub(crate) _temp_dir: Arc<TempDir>,
    /// UTF-8 path to the staging directory.
    pub(crate) path: Utf8PathBuf,
}

impl StagingRoot {
    pub(crate) fn new() -> StepResult<Self> {
        let temp_dir = tempfile::tempdir()
            .map_err(|error| format!("failed to create staging directory: {error}"))?;
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|_| String::from("staging directory path should be valid UTF-8"))?;
        Ok(Self {
            _temp_dir: Arc::new(temp_dir),
            path,
        })
    }
}

/// One `adb push` the fake bridge was asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub(crate) serial: String,
    pub(crate) local: Utf8PathBuf,
    pub(crate) remote: Utf8PathBuf,
}

/// High-level outcome of a push.
#[derive(Debug, Clone)]
pub(crate) enum PushOutcome {
    /// The bundle reached the device with this serial.
    Pushed(String),
    /// The push failed with this rendered error.
    Failed(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct PushState {
    pub(crate) staging: Slot<StagingRoot>,
    pub(crate) devices: Slot<Vec<Device>>,
    pub(crate) answer: Slot<String>,
    pub(crate) outcome: Slot<PushOutcome>,
    pub(crate) list_calls: Slot<usize>,
    pub(crate) transfers: Slot<Vec<Transfer>>,
    pub(crate) report: Slot<String>,
}

#[fixture]
pub(crate) fn push_state() -> PushState {
    let state = PushState::default();
    state.devices.set(Vec::new());
    state.answer.set(String::new());
    state
}
