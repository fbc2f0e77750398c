//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{HttpCounterSource, LiveClock, LiveFileSystem};
use crate::adapters::recording::{RecordingClock, RecordingCounterSource, RecordingFileSystem};
use crate::adapters::replaying::{ReplayingClock, ReplayingCounterSource, ReplayingFileSystem};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::ids::IdFormat;
use crate::ports::{Clock, CounterSource, FileSystem};

/// Bundles the ports and identifier format used by one run.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying); everything downstream takes `&ServiceContext`.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for batch input and report output.
    pub fs: Box<dyn FileSystem>,
    /// Remote ATL counter.
    pub counter: Box<dyn CounterSource>,
    /// Prefixes and suffixes for generated identifiers.
    pub format: IdFormat,
}

impl ServiceContext {
    /// Assembles a context from explicit ports.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        fs: Box<dyn FileSystem>,
        counter: Box<dyn CounterSource>,
        format: IdFormat,
    ) -> Self {
        Self { clock, fs, counter, format }
    }

    /// Creates a context backed by the system clock, disk, and HTTP counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, String> {
        let counter = HttpCounterSource::new(config).map_err(|e| e.to_string())?;
        Ok(Self::new(
            Box::new(LiveClock),
            Box::new(LiveFileSystem),
            Box::new(counter),
            config.format.clone(),
        ))
    }

    /// Creates a live context whose port calls are recorded into `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(config: &Config, session: &RecordingSession) -> Result<Self, String> {
        let live = Self::live(config)?;
        Ok(Self::new(
            Box::new(RecordingClock::new(live.clock, session.recorder())),
            Box::new(RecordingFileSystem::new(live.fs, session.recorder())),
            Box::new(RecordingCounterSource::new(live.counter, session.recorder())),
            live.format,
        ))
    }

    /// Creates a context that serves every port from one cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path, format: IdFormat) -> Result<Self, String> {
        let cassette = Cassette::load(path).map_err(|e| e.to_string())?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self::new(
            Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            Box::new(ReplayingCounterSource::new(replayer)),
            format,
        ))
    }
}
