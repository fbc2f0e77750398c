//! Recording adapter for the `CounterSource` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ids::Period;
use crate::ports::{CounterFuture, CounterRequest, CounterSource};

/// Records counter lookups while delegating to an inner source.
pub struct RecordingCounterSource {
    inner: Box<dyn CounterSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCounterSource {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn CounterSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CounterSource for RecordingCounterSource {
    fn last_number(&self, period: Period) -> CounterFuture<'_> {
        Box::pin(async move {
            let result = self.inner.last_number(period).await;
            let input = CounterRequest::from(period);
            record_result(&self.recorder, "counter", "last_number", &input, &result);
            result
        })
    }
}
