//! Given/when steps for push scenarios.

use std::fs;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use apimock::api::{self, PushParams};
use apimock::bundle::StagingDir;
use apimock::device::{Device, DeviceBridge, TerminalPrompt};
use apimock::error::DeviceError;
use apimock::reporter::{Reporter, Severity};
use camino::{Utf8Path, Utf8PathBuf};
use mockall::mock;
use rstest_bdd_macros::{given, when};
use serde_json::{Map, Value, json};

use super::StepResult;
use super::state::{PushOutcome, PushState, StagingRoot, Transfer};

mock! {
    #[derive(Debug)]
    Bridge {}

    impl DeviceBridge for Bridge {
        fn list_devices(&self) -> Result<Vec<Device>, DeviceError>;
        fn push(
            &self,
            device: &Device,
            local: &Utf8Path,
            remote: &Utf8Path,
        ) -> Result<(), DeviceError>;
    }
}

fn staging_path(push_state: &PushState) -> StepResult<Utf8PathBuf> {
    push_state
        .staging
        .get()
        .map(|staging| staging.path)
        .ok_or_else(|| String::from("a staged bundle should be created first"))
}

fn write_json(path: &Utf8Path, value: &Value) -> StepResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| format!("mkdir {parent}: {error}"))?;
    }
    let text = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to serialise {path}: {error}"))?;
    fs::write(path, text).map_err(|error| format!("failed to write {path}: {error}"))
}

fn stage_config(push_state: &PushState, config: &Value) -> StepResult<()> {
    let staging = StagingRoot::new()?;
    fs::create_dir_all(staging.path.join("mock"))
        .map_err(|error| format!("failed to create mock directory: {error}"))?;
    write_json(&staging.path.join("config.json"), config)?;
    push_state.staging.set(staging);
    Ok(())
}

#[given("a staged bundle with remote {remote}")]
fn staged_bundle_with_remote(push_state: &PushState, remote: String) -> StepResult<()> {
    stage_config(
        push_state,
        &json!({
            "base": "http://x",
            "delay": 500,
            "remote": remote,
            "route": {},
        }),
    )
}

#[given("a staged bundle without a remote")]
fn staged_bundle_without_remote(push_state: &PushState) -> StepResult<()> {
    stage_config(
        push_state,
        &json!({ "base": "http://x", "delay": 500, "route": {} }),
    )
}

#[given("the route {pattern} serves {target}")]
fn route_serves(push_state: &PushState, pattern: String, target: String) -> StepResult<()> {
    let config_file = staging_path(push_state)?.join("config.json");
    let text = fs::read_to_string(&config_file)
        .map_err(|error| format!("failed to read {config_file}: {error}"))?;
    let mut config: Map<String, Value> =
        serde_json::from_str(&text).map_err(|error| format!("config should be JSON: {error}"))?;
    let route = config
        .entry("route")
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(table) = route else {
        return Err(String::from("route should be an object"));
    };
    table.insert(pattern, Value::String(target));
    write_json(&config_file, &Value::Object(config))
}

#[given("the mock file {relative} holds an empty JSON object")]
fn mock_file_holds_empty_object(push_state: &PushState, relative: String) -> StepResult<()> {
    let path = staging_path(push_state)?.join(relative);
    write_json(&path, &json!({}))
}

#[given("one attached device {serial}")]
fn one_attached_device(push_state: &PushState, serial: String) {
    push_state
        .devices
        .set(vec![Device::new(serial, "sdk_gphone64_x86_64")]);
}

#[given("attached devices {serials}")]
fn attached_devices(push_state: &PushState, serials: String) {
    let devices = serials
        .split(',')
        .enumerate()
        .map(|(index, serial)| Device::new(serial.trim(), format!("Model_{index}")))
        .collect();
    push_state.devices.set(devices);
}

#[given("no attached devices")]
fn no_attached_devices(push_state: &PushState) {
    push_state.devices.set(Vec::new());
}

#[given("the user answers {answer}")]
fn user_answers(push_state: &PushState, answer: String) {
    push_state.answer.set(format!("{answer}\n"));
}

#[when("the bundle is pushed")]
fn bundle_is_pushed(push_state: &PushState) -> StepResult<()> {
    let staging = StagingDir::from_absolute(staging_path(push_state)?);
    let devices = push_state.devices.get().unwrap_or_default();
    let answer = push_state.answer.get().unwrap_or_default();

    let list_calls = Arc::new(AtomicUsize::new(0));
    let transfers = Arc::new(Mutex::new(Vec::new()));
    let bridge = recording_bridge(devices, &list_calls, &transfers);

    let mut prompt = TerminalPrompt::new(Cursor::new(answer), Vec::new());
    let mut reporter = Reporter::new(Vec::new(), Severity::Info);
    let result = api::push(PushParams {
        staging: &staging,
        bridge: &bridge,
        prompt: &mut prompt,
        reporter: &mut reporter,
    });

    push_state.outcome.set(match result {
        Ok(summary) => PushOutcome::Pushed(summary.serial().to_owned()),
        Err(error) => PushOutcome::Failed(error.to_string()),
    });
    push_state.list_calls.set(list_calls.load(Ordering::SeqCst));
    let recorded = transfers
        .lock()
        .map_err(|_| String::from("transfer log mutex poisoned"))?
        .clone();
    push_state.transfers.set(recorded);
    push_state.report.set(
        String::from_utf8(reporter.into_inner())
            .map_err(|error| format!("report should be UTF-8: {error}"))?,
    );
    Ok(())
}

/// A bridge that serves `devices` and records every transfer it is asked for.
fn recording_bridge(
    devices: Vec<Device>,
    list_calls: &Arc<AtomicUsize>,
    transfers: &Arc<Mutex<Vec<Transfer>>>,
) -> MockBridge {
    let mut bridge = MockBridge::new();

    let calls = Arc::clone(list_calls);
    bridge.expect_list_devices().returning(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(devices.clone())
    });

    let log = Arc::clone(transfers);
    bridge.expect_push().returning(move |device, local, remote| {
        if let Ok(mut entries) = log.lock() {
            entries.push(Transfer {
                serial: device.serial().to_owned(),
                local: local.to_path_buf(),
                remote: remote.to_path_buf(),
            });
        }
        Ok(())
    });

    bridge
}
