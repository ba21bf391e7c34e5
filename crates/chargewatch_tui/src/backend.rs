//! Backend trait for dashboard data.
//!
//! The dashboard only needs the logged events and a way to tell whether
//! they changed, so any event source (the CSV log, fixtures in tests) can
//! drive it.

use chargewatch_core::PredictionEvent;
use chargewatch_error::ChargewatchResult;

/// Source of monitoring events for the dashboard.
///
/// Only requires `Send` since the dashboard is single-threaded.
pub trait MonitorBackend: Send {
    /// Human-readable name of the source, shown in the header.
    fn source(&self) -> String;

    /// All events, sorted by timestamp ascending. Empty when nothing has
    /// been logged yet.
    fn load_events(&mut self) -> ChargewatchResult<Vec<PredictionEvent>>;

    /// Whether the source changed since the last [`load_events`].
    ///
    /// [`load_events`]: MonitorBackend::load_events
    fn has_changed(&self) -> bool;

    /// Forget anything cached so the next load re-reads the source.
    fn invalidate(&mut self) {}
}
