//! Event log error types.

/// Kinds of event log errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LogErrorKind {
    /// Failed to create the directory holding the log file
    #[display("Failed to create log directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to open the log file
    #[display("Failed to open log file: {}", _0)]
    FileOpen(String),
    /// Failed to write to the log file
    #[display("Failed to write log file: {}", _0)]
    FileWrite(String),
    /// Failed to read the log file
    #[display("Failed to read log file: {}", _0)]
    FileRead(String),
    /// A row could not be parsed back into an event
    #[display("Failed to parse log row: {}", _0)]
    Parse(String),
    /// Header row does not match the fixed column layout
    #[display("Unexpected log header: {}", _0)]
    HeaderMismatch(String),
    /// A row could not be serialized
    #[display("Failed to serialize log row: {}", _0)]
    Serialize(String),
}

/// Event log error with location tracking.
///
/// # Examples
///
/// ```
/// use chargewatch_error::{LogError, LogErrorKind};
///
/// let err = LogError::new(LogErrorKind::FileRead("monitoring_logs.csv".to_string()));
/// assert!(format!("{}", err).contains("read log file"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Log Error: {} at line {} in {}", kind, line, file)]
pub struct LogError {
    /// The kind of error that occurred
    pub kind: LogErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LogError {
    /// Create a new log error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
