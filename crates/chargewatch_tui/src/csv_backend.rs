//! CSV log implementation of the dashboard backend.

use crate::MonitorBackend;
use chargewatch_core::PredictionEvent;
use chargewatch_error::ChargewatchResult;
use chargewatch_log::{CachedEventLog, CsvEventLog};

/// Reads the shared CSV log through a [`CachedEventLog`].
#[derive(Debug)]
pub struct CsvMonitorBackend {
    cache: CachedEventLog,
}

impl CsvMonitorBackend {
    /// Create a backend over `log`. Nothing is read until the first load.
    pub fn new(log: CsvEventLog) -> Self {
        Self {
            cache: CachedEventLog::new(log),
        }
    }

    /// Number of times the file has been read.
    pub fn loads(&self) -> usize {
        self.cache.loads()
    }
}

impl MonitorBackend for CsvMonitorBackend {
    fn source(&self) -> String {
        self.cache.log().path().display().to_string()
    }

    #[tracing::instrument(skip(self))]
    fn load_events(&mut self) -> ChargewatchResult<Vec<PredictionEvent>> {
        Ok(self.cache.events()?.to_vec())
    }

    fn has_changed(&self) -> bool {
        self.cache.is_stale()
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
