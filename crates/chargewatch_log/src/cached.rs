//! Lazily loaded, change-aware view of a CSV log.

use crate::{CsvEventLog, EventLog};
use chargewatch_core::PredictionEvent;
use chargewatch_error::ChargewatchResult;
use std::time::SystemTime;

/// What the file looked like when it was last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fingerprint {
    Missing,
    Present { modified: Option<SystemTime>, len: u64 },
}

/// Caches the last load of a [`CsvEventLog`] and reloads it only when the
/// file's modification time or length changes, or after [`invalidate`].
///
/// [`invalidate`]: CachedEventLog::invalidate
#[derive(Debug)]
pub struct CachedEventLog {
    log: CsvEventLog,
    cached: Option<(Fingerprint, Vec<PredictionEvent>)>,
    loads: usize,
}

impl CachedEventLog {
    /// Wrap a log. Nothing is read until [`events`](Self::events) is called.
    pub fn new(log: CsvEventLog) -> Self {
        Self {
            log,
            cached: None,
            loads: 0,
        }
    }

    /// The wrapped log.
    pub fn log(&self) -> &CsvEventLog {
        &self.log
    }

    /// Number of times the file has actually been read.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Drop the cached events so the next call re-reads the file.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether the file changed since the cached load (or nothing is cached).
    pub fn is_stale(&self) -> bool {
        match &self.cached {
            Some((fingerprint, _)) => *fingerprint != self.fingerprint(),
            None => true,
        }
    }

    /// Events sorted by timestamp ascending, reloading if the file changed.
    #[tracing::instrument(skip(self), fields(path = %self.log.path().display()))]
    pub fn events(&mut self) -> ChargewatchResult<&[PredictionEvent]> {
        let fingerprint = self.fingerprint();
        let fresh = matches!(&self.cached, Some((cached, _)) if *cached == fingerprint);
        if !fresh {
            let events = self.log.load()?;
            self.loads += 1;
            tracing::debug!(rows = events.len(), loads = self.loads, "Reloaded log");
            self.cached = Some((fingerprint, events));
        }
        Ok(self
            .cached
            .as_ref()
            .map(|(_, events)| events.as_slice())
            .unwrap_or_default())
    }

    fn fingerprint(&self) -> Fingerprint {
        match std::fs::metadata(self.log.path()) {
            Ok(meta) => Fingerprint::Present {
                modified: meta.modified().ok(),
                len: meta.len(),
            },
            Err(_) => Fingerprint::Missing,
        }
    }
}
