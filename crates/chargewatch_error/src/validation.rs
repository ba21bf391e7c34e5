//! Input validation errors.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Value lies outside its permitted range
    #[display("{} must be between {} and {}, got {}", field, min, max, value)]
    OutOfRange {
        /// The field name
        field: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
        /// Offending value
        value: String,
    },

    /// Feedback submitted before any prediction was made
    #[display("Please run the prediction first, then submit your feedback")]
    NoPredictionYet,

    /// Builder failed to assemble a value
    #[display("Validation failed: {}", _0)]
    Builder(String),
}

/// Validation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// Convert from derive_builder error string.
impl From<String> for ValidationError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(ValidationErrorKind::Builder(msg))
    }
}

