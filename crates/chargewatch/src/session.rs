//! The prediction surface: predict first, then submit feedback on it.

use chargewatch_core::{InsuranceInput, ModelIdentity, PredictionEvent, format_dollars};
use chargewatch_error::{ChargewatchResult, ValidationError, ValidationErrorKind};
use chargewatch_log::{EventLog, Feedback, record_submission};
use chargewatch_models::{ModelPair, PairPrediction};
use serde::Serialize;

/// The most recent prediction, kept until feedback is submitted on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    /// Input both models saw
    pub input: InsuranceInput,
    /// `input_summary` column value
    pub input_summary: String,
    /// Both predictions and their latency
    pub prediction: PairPrediction,
}

impl PredictionOutcome {
    /// Display lines: both predictions in dollars and the latency.
    pub fn display_lines(&self, pair: &ModelPair) -> [String; 3] {
        let line = |identity: &ModelIdentity, charges: f64| {
            format!(
                "{} ({}): {}",
                identity.version(),
                identity.model_type(),
                format_dollars(charges)
            )
        };
        [
            line(pair.baseline_identity(), self.prediction.baseline),
            line(pair.improved_identity(), self.prediction.improved),
            format!("Latency: {:.1} ms", self.prediction.latency_ms),
        ]
    }
}

/// Prediction state for one user: the models, the log, and the latest
/// outcome.
pub struct PredictionSession<'a, L: EventLog> {
    models: &'a ModelPair,
    log: L,
    latest: Option<PredictionOutcome>,
}

impl<'a, L: EventLog> PredictionSession<'a, L> {
    /// Start a session with no prediction yet.
    pub fn new(models: &'a ModelPair, log: L) -> Self {
        Self {
            models,
            log,
            latest: None,
        }
    }

    /// The latest prediction, if one has been run.
    pub fn latest(&self) -> Option<&PredictionOutcome> {
        self.latest.as_ref()
    }

    /// The log feedback is written to.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Run both models on `input` and keep the outcome for feedback.
    #[tracing::instrument(skip(self, input))]
    pub fn run_prediction(&mut self, input: InsuranceInput) -> &PredictionOutcome {
        let prediction = self.models.predict(&input);
        self.latest.insert(PredictionOutcome {
            input_summary: input.summary(),
            input,
            prediction,
        })
    }

    /// Log one row per model for the latest prediction with `feedback`.
    ///
    /// Fails with [`ValidationErrorKind::NoPredictionYet`] and writes
    /// nothing when no prediction has been run.
    #[tracing::instrument(skip_all)]
    pub fn submit_feedback(&self, feedback: &Feedback) -> ChargewatchResult<Vec<PredictionEvent>> {
        let Some(outcome) = &self.latest else {
            tracing::warn!("Feedback submitted before any prediction");
            return Err(ValidationError::new(ValidationErrorKind::NoPredictionYet).into());
        };

        record_submission(
            &self.log,
            &outcome.input_summary,
            Some(outcome.prediction.latency_ms),
            feedback,
            &[
                (self.models.baseline_identity(), outcome.prediction.baseline),
                (self.models.improved_identity(), outcome.prediction.improved),
            ],
        )
    }
}
