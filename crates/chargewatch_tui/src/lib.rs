//! Terminal dashboard for prediction monitoring.
//!
//! Renders key metrics, a per-version comparison, feedback analysis and the
//! raw log for the selected model version. Data comes through the
//! [`MonitorBackend`] trait; [`CsvMonitorBackend`] reads the shared CSV log
//! and reloads it when the file changes. Built with ratatui.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod backend;
mod csv_backend;
mod events;
mod runner;
mod ui;

pub use app::{App, Tab};
pub use backend::MonitorBackend;
pub use chargewatch_error::{TuiError, TuiErrorKind, TuiResult};
pub use csv_backend::CsvMonitorBackend;
pub use events::{Event, EventHandler};
pub use runner::{DashboardSettings, run_dashboard};
