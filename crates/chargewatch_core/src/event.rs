//! One row of the monitoring log.

use crate::timestamp::serde_timestamp;
use crate::{FeedbackScore, ModelIdentity};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Log columns, in the order every row is written.
pub const EVENT_COLUMNS: [&str; 8] = [
    "timestamp",
    "model_version",
    "model_type",
    "input_summary",
    "predicted_charges",
    "latency_ms",
    "feedback_score",
    "feedback_text",
];

/// A single prediction plus the user's rating of it.
///
/// Field order mirrors [`EVENT_COLUMNS`]; serializers rely on it.
///
/// # Examples
///
/// ```
/// use chargewatch_core::{FeedbackScore, ModelIdentity, PredictionEvent};
///
/// let event = PredictionEvent::new(
///     &ModelIdentity::baseline(),
///     "age=30, sex=male, bmi=27.5, children=0, smoker=yes, region=northeast",
///     13_256.4,
///     Some(1.8),
///     Some(FeedbackScore::new(5).unwrap()),
///     None,
/// );
///
/// assert_eq!(event.model_version, "v1_old");
/// assert_eq!(event.feedback_text, "");
/// assert!(!event.has_comment());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEvent {
    /// When the row was written (UTC)
    #[serde(with = "serde_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Which model version produced the prediction
    pub model_version: String,
    /// Free-form model label, e.g. "baseline"
    pub model_type: String,
    /// Rendering of the request inputs
    pub input_summary: String,
    /// Predicted yearly charges in dollars
    pub predicted_charges: f64,
    /// Wall-clock time of the predicting call
    pub latency_ms: Option<f64>,
    /// User-supplied 1-5 rating
    pub feedback_score: Option<FeedbackScore>,
    /// User-supplied comment, empty when none was given
    #[serde(default)]
    pub feedback_text: String,
}

impl PredictionEvent {
    /// Build an event stamped with the current UTC time.
    ///
    /// The timestamp is truncated to the microsecond precision the log keeps.
    pub fn new(
        identity: &ModelIdentity,
        input_summary: impl Into<String>,
        predicted_charges: f64,
        latency_ms: Option<f64>,
        feedback_score: Option<FeedbackScore>,
        feedback_text: Option<&str>,
    ) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(6),
            model_version: identity.version().clone(),
            model_type: identity.model_type().clone(),
            input_summary: input_summary.into(),
            predicted_charges,
            latency_ms,
            feedback_score,
            feedback_text: feedback_text.unwrap_or_default().to_string(),
        }
    }

    /// Replace the write-time timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether the comment has any non-whitespace content.
    pub fn has_comment(&self) -> bool {
        !self.feedback_text.trim().is_empty()
    }
}
