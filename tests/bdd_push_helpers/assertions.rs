//! Assertion helpers for push behavioural tests.

use rstest_bdd_macros::then;

use super::StepResult;
use super::state::{PushOutcome, PushState, Transfer};

fn outcome(push_state: &PushState) -> StepResult<PushOutcome> {
    push_state
        .outcome
        .get()
        .ok_or_else(|| String::from("outcome should be set"))
}

#[then("the push succeeds")]
fn push_succeeds(push_state: &PushState) -> StepResult<()> {
    match outcome(push_state)? {
        PushOutcome::Pushed(_) => Ok(()),
        PushOutcome::Failed(message) => Err(format!("expected success, got error: {message}")),
    }
}

#[then("the push fails with {text}")]
fn push_fails_with(push_state: &PushState, text: String) -> StepResult<()> {
    match outcome(push_state)? {
        PushOutcome::Failed(message) if message.contains(&text) => Ok(()),
        PushOutcome::Failed(message) => Err(format!(
            "expected error containing '{text}', got: {message}"
        )),
        PushOutcome::Pushed(serial) => Err(format!(
            "expected failure containing '{text}', but pushed to {serial}"
        )),
    }
}

#[then("{local} is pushed to {remote} on {serial}")]
fn is_pushed_to(
    push_state: &PushState,
    local: String,
    remote: String,
    serial: String,
) -> StepResult<()> {
    let staging = push_state
        .staging
        .get()
        .ok_or_else(|| String::from("staging directory should be set"))?;
    let expected = Transfer {
        serial,
        local: staging.path.join(local),
        remote: remote.into(),
    };
    let transfers = push_state.transfers.get().unwrap_or_default();
    if transfers.contains(&expected) {
        Ok(())
    } else {
        Err(format!("expected {expected:?} among {transfers:?}"))
    }
}

#[then("nothing is transferred")]
fn nothing_is_transferred(push_state: &PushState) -> StepResult<()> {
    let transfers = push_state.transfers.get().unwrap_or_default();
    if transfers.is_empty() {
        Ok(())
    } else {
        Err(format!("expected no transfers, got {transfers:?}"))
    }
}

#[then("no device operations are performed")]
fn no_device_operations(push_state: &PushState) -> StepResult<()> {
    let list_calls = push_state.list_calls.get().unwrap_or_default();
    if list_calls != 0 {
        return Err(format!("expected no device listing, got {list_calls} call(s)"));
    }
    nothing_is_transferred(push_state)
}

#[then("the report contains {text}")]
fn report_contains(push_state: &PushState, text: String) -> StepResult<()> {
    let report = push_state.report.get().unwrap_or_default();
    if report.contains(&text) {
        Ok(())
    } else {
        Err(format!("expected report to contain '{text}', got:\n{report}"))
    }
}
