//! Shared output helpers.

use chargewatch::{ChargewatchResult, JsonError};
use serde::Serialize;

/// Shown wherever the log does not exist or holds no rows.
pub const NO_LOGS_NOTICE: &str = "No monitoring logs found yet. Please run a prediction, \
                                  submit feedback at least once, and then try again.";

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ChargewatchResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
