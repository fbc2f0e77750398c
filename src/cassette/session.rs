//! Recording session shared by every recording adapter.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use super::CassetteError;

/// Owns the recorder that all recording adapters of one run write into.
///
/// The cassette lands at `<dir>/<timestamp>.cassette.yaml`.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
    path: PathBuf,
}

impl RecordingSession {
    /// Starts a session writing into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a cassette
    /// with the same timestamp already exists.
    pub fn start(dir: &Path) -> Result<Self, CassetteError> {
        std::fs::create_dir_all(dir)
            .map_err(|source| CassetteError::Io { path: dir.display().to_string(), source })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        if path.exists() {
            return Err(CassetteError::Io {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "cassette exists"),
            });
        }

        let recorder = CassetteRecorder::new(&path, format!("labid-{timestamp}"));
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), path })
    }

    /// Handle for a recording adapter.
    #[must_use]
    pub fn recorder(&self) -> Arc<Mutex<CassetteRecorder>> {
        Arc::clone(&self.recorder)
    }

    /// Where the cassette will be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the cassette. Every adapter handle must have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| CassetteError::StillShared)?
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        recorder.finish()
    }
}
