//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Serves recorded filesystem results. Writes touch nothing on disk.
pub struct ReplayingFileSystem {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFileSystem {
    /// Creates a filesystem backed by the shared replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        Ok(replay_result(output, "fs::read_to_string")?)
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "write");
        Ok(replay_result(output, "fs::write")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn shared(method: &str, output: serde_json::Value) -> Arc<Mutex<CassetteReplayer>> {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "fs".into(),
                method: method.into(),
                input: json!({"path": "/batch.json"}),
                output,
            }],
        };
        Arc::new(Mutex::new(CassetteReplayer::new(&cassette)))
    }

    #[test]
    fn replays_read() {
        let fs = ReplayingFileSystem::new(shared("read_to_string", json!({"ok": "[]"})));
        assert_eq!(fs.read_to_string(Path::new("/batch.json")).unwrap(), "[]");
    }

    #[test]
    fn replays_read_error() {
        let fs = ReplayingFileSystem::new(shared("read_to_string", json!({"err": "file not found"})));
        let err = fs.read_to_string(Path::new("/batch.json")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn replays_write() {
        let fs = ReplayingFileSystem::new(shared("write", json!({"ok": null})));
        assert!(fs.write(Path::new("/report.html"), "<p>x</p>").is_ok());
    }
}
