//! Error types for chargewatch.
//!
//! This crate provides the foundation error types used throughout the chargewatch workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use chargewatch_error::{ChargewatchResult, LogError, LogErrorKind};
//!
//! fn append_row() -> ChargewatchResult<()> {
//!     Err(LogError::new(LogErrorKind::FileWrite("disk full".to_string())))?
//! }
//!
//! match append_row() {
//!     Ok(()) => println!("Logged"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod log;
mod model;
#[cfg(feature = "tui")]
mod tui;
mod validation;

pub use config::ConfigError;
pub use error::{ChargewatchError, ChargewatchErrorKind, ChargewatchResult};
pub use json::JsonError;
pub use log::{LogError, LogErrorKind};
pub use model::{ModelError, ModelErrorKind};
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};
pub use validation::{ValidationError, ValidationErrorKind};
