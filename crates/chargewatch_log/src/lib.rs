//! Append-only prediction event log for chargewatch.
//!
//! The log is the only state shared between the prediction surface and the
//! monitoring views. This crate defines the [`EventLog`] abstraction and a
//! CSV file backend.
//!
//! # Features
//!
//! - **Fixed schema**: every row carries the columns of
//!   [`chargewatch_core::EVENT_COLUMNS`] in that order
//! - **Header on creation**: the first writer creates the file and its header
//! - **Atomic batch append**: a batch is encoded up front and written with a
//!   single append, so the rows of one feedback submission land together
//! - **Missing file is empty**: reading before anything was logged yields no
//!   events rather than an error
//!
//! # Example
//!
//! ```rust
//! use chargewatch_core::ModelIdentity;
//! use chargewatch_log::{CsvEventLog, EventLog, Feedback, record};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let log = CsvEventLog::new("/tmp/chargewatch/monitoring_logs.csv");
//! let feedback = Feedback::new(Some(4), Some("looks right"))?;
//!
//! record(
//!     &log,
//!     &ModelIdentity::baseline(),
//!     "age=30, sex=male, bmi=27.5, children=0, smoker=yes, region=northeast",
//!     13_256.4,
//!     Some(1.2),
//!     &feedback,
//! )?;
//!
//! let events = log.load()?;
//! assert!(!events.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chargewatch_core::PredictionEvent;
use chargewatch_error::ChargewatchResult;

mod cached;
mod csv_log;
mod record;

pub use cached::CachedEventLog;
pub use chargewatch_error::{LogError, LogErrorKind};
pub use csv_log::CsvEventLog;
pub use record::{Feedback, record, record_submission};

/// Durable, append-only store of prediction events.
///
/// Implementations never mutate or delete a row once written.
pub trait EventLog {
    /// Append a batch of events.
    ///
    /// The batch is all-or-nothing from the caller's point of view: either
    /// every row is handed to the backend in one write, or an error is
    /// returned before anything is written.
    fn append(&self, events: &[PredictionEvent]) -> ChargewatchResult<()>;

    /// Load every event, sorted by timestamp ascending.
    ///
    /// Returns an empty vector when nothing has been logged yet.
    fn load(&self) -> ChargewatchResult<Vec<PredictionEvent>>;
}
