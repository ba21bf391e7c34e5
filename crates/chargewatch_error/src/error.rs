//! Top-level error wrapper types.

#[cfg(feature = "tui")]
use crate::TuiError;
use crate::{ConfigError, JsonError, LogError, ModelError, ValidationError};

/// The foundation error enum; every crate-level error converts into it.
///
/// # Examples
///
/// ```
/// use chargewatch_error::{ChargewatchError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: ChargewatchError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ChargewatchErrorKind {
    /// Event log error
    #[from(LogError)]
    Log(LogError),
    /// Predictor or training error
    #[from(ModelError)]
    Model(ModelError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Input validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Dashboard error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// Chargewatch error with kind discrimination.
///
/// # Examples
///
/// ```
/// use chargewatch_error::{ChargewatchResult, ConfigError};
///
/// fn might_fail() -> ChargewatchResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Chargewatch Error: {}", _0)]
pub struct ChargewatchError(Box<ChargewatchErrorKind>);

impl ChargewatchError {
    /// Create a new error from a kind.
    pub fn new(kind: ChargewatchErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChargewatchErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ChargewatchErrorKind
impl<T> From<T> for ChargewatchError
where
    T: Into<ChargewatchErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for chargewatch operations.
pub type ChargewatchResult<T> = std::result::Result<T, ChargewatchError>;
