//! Shared fixtures for command tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::adapters::live::clock::FixedClock;
use crate::context::ServiceContext;
use crate::ids::{IdFormat, Period};
use crate::ports::{CounterError, CounterFuture, CounterSource, FileSystem};

pub(crate) type Files = Arc<Mutex<HashMap<PathBuf, String>>>;

/// In-memory filesystem for testing commands without touching disk.
pub(crate) struct MemFs {
    files: Files,
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Counter that answers with a fixed value, or fails when `None`.
pub(crate) struct FixedCounter(pub Option<u64>);

impl CounterSource for FixedCounter {
    fn last_number(&self, _period: Period) -> CounterFuture<'_> {
        let last = self.0;
        Box::pin(async move { last.ok_or_else(|| CounterError::Transport("connection refused".into())) })
    }
}

/// Context pinned to 2025-04-15T10:30:00Z with the given counter value.
pub(crate) fn memory_context(last: Option<u64>, files: &[(&str, &str)]) -> (ServiceContext, Files) {
    let store: Files = Arc::new(Mutex::new(
        files.iter().map(|(p, c)| (PathBuf::from(p), (*c).to_string())).collect(),
    ));
    let now = Utc.with_ymd_and_hms(2025, 4, 15, 10, 30, 0).unwrap();
    let ctx = ServiceContext::new(
        Box::new(FixedClock(now)),
        Box::new(MemFs { files: Arc::clone(&store) }),
        Box::new(FixedCounter(last)),
        IdFormat::default(),
    );
    (ctx, store)
}

pub(crate) fn fixed_context(last: Option<u64>) -> ServiceContext {
    memory_context(last, &[]).0
}

pub(crate) fn fixed_context_with_file(last: Option<u64>, contents: &str) -> ServiceContext {
    memory_context(last, &[("batch.json", contents)]).0
}
