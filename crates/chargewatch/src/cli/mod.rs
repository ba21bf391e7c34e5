//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the chargewatch binary.

mod commands;
mod dashboard;
mod monitor;
mod output;
mod predict;
mod train;

pub use commands::{Cli, Commands};
pub use dashboard::launch_dashboard;
pub use monitor::{show_comments, show_logs, show_summary};
pub use predict::{predict, record_feedback};
pub use train::train_models;
