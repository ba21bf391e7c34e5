//! Usefulness rating supplied with feedback.

use chargewatch_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// A 1-5 usefulness score (1 = poor, 5 = excellent).
///
/// # Examples
///
/// ```
/// use chargewatch_core::FeedbackScore;
///
/// let score = FeedbackScore::new(4).unwrap();
/// assert_eq!(score.value(), 4);
/// assert!(FeedbackScore::new(0).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}", _0)]
pub struct FeedbackScore(u8);

impl FeedbackScore {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 5;
    /// Score preselected by the feedback form.
    pub const DEFAULT: FeedbackScore = FeedbackScore(4);

    /// Creates a score, rejecting values outside 1-5.
    #[track_caller]
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::new(ValidationErrorKind::OutOfRange {
                field: "feedback_score".to_string(),
                min: Self::MIN.to_string(),
                max: Self::MAX.to_string(),
                value: value.to_string(),
            }))
        }
    }

    /// The raw score.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for FeedbackScore {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for FeedbackScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeedbackScore> for u8 {
    fn from(score: FeedbackScore) -> Self {
        score.0
    }
}

impl From<FeedbackScore> for f64 {
    fn from(score: FeedbackScore) -> Self {
        f64::from(score.0)
    }
}
