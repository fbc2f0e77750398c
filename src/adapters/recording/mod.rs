//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod counter;
pub mod filesystem;

pub use clock::RecordingClock;
pub use counter::RecordingCounterSource;
pub use filesystem::RecordingFileSystem;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Records a plain (non-`Result`) interaction.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let (Some(input), Some(output)) = (to_json(port, method, input), to_json(port, method, output))
    else {
        return;
    };
    recorder.lock().unwrap_or_else(PoisonError::into_inner).record(port, method, input, output);
}

/// Records a `Result` as `{"ok": value}` or `{"err": message}`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let Some(input) = to_json(port, method, input) else {
        return;
    };
    let output = match result {
        Ok(v) => match to_json(port, method, v) {
            Some(inner) => json!({ "ok": inner }),
            None => return,
        },
        Err(e) => json!({ "err": e.to_string() }),
    };
    recorder.lock().unwrap_or_else(PoisonError::into_inner).record(port, method, input, output);
}

fn to_json<T: Serialize>(port: &str, method: &str, value: &T) -> Option<Value> {
    serde_json::to_value(value)
        .map_err(|e| warn!(port, method, error = %e, "interaction not recorded"))
        .ok()
}
