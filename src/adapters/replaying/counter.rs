//! Replaying adapter for the `CounterSource` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ids::Period;
use crate::ports::{CounterError, CounterFuture, CounterSource};

/// Serves recorded counter lookups.
pub struct ReplayingCounterSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingCounterSource {
    /// Creates a counter source backed by the shared replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl CounterSource for ReplayingCounterSource {
    fn last_number(&self, _period: Period) -> CounterFuture<'_> {
        let output = next_output(&self.replayer, "counter", "last_number");
        Box::pin(async move {
            replay_result(output, "counter::last_number").map_err(CounterError::Replayed)
        })
    }
}
