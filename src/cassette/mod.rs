//! Cassette format for recording and replaying port interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

use thiserror::Error;

/// Failures while reading or writing cassette files.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// The cassette file could not be read or written.
    #[error("cassette I/O failed for {path}: {source}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The cassette contents are not valid YAML for a cassette.
    #[error("cassette {path} is malformed: {source}")]
    Yaml {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A recording adapter still holds the recorder.
    #[error("recorder still shared by a live adapter")]
    StillShared,
}
