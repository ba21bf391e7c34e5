//! The `record` operation: one prediction event per model, one append.

use crate::EventLog;
use chargewatch_core::{FeedbackScore, ModelIdentity, PredictionEvent};
use chargewatch_error::{ChargewatchResult, ValidationError};
use derive_getters::Getters;

/// The user's rating and comment for a set of predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Feedback {
    /// 1-5 usefulness score, if one was given
    score: Option<FeedbackScore>,
    /// Free-text comment; empty when none was given
    text: String,
}

impl Feedback {
    /// Coerce raw form values: the score must be 1-5 when present, a missing
    /// comment becomes the empty string.
    #[track_caller]
    pub fn new(score: Option<u8>, text: Option<&str>) -> Result<Self, ValidationError> {
        let score = score.map(FeedbackScore::new).transpose()?;
        Ok(Self {
            score,
            text: text.unwrap_or_default().to_string(),
        })
    }
}

/// Append one prediction event to `log`, stamped with the current UTC time.
///
/// Returns the event exactly as written.
#[tracing::instrument(skip(log, input_summary, feedback), fields(model_version = %identity.version()))]
pub fn record<L>(
    log: &L,
    identity: &ModelIdentity,
    input_summary: &str,
    prediction: f64,
    latency_ms: Option<f64>,
    feedback: &Feedback,
) -> ChargewatchResult<PredictionEvent>
where
    L: EventLog + ?Sized,
{
    let event = PredictionEvent::new(
        identity,
        input_summary,
        prediction,
        latency_ms,
        feedback.score,
        Some(&feedback.text),
    );
    log.append(std::slice::from_ref(&event))?;
    tracing::info!(prediction, "Recorded prediction event");
    Ok(event)
}

/// Append the events of one feedback submission, one row per model, in a
/// single append so the rows are never split.
///
/// All rows share `input_summary`, `latency_ms` and the feedback.
#[tracing::instrument(skip_all, fields(models = predictions.len()))]
pub fn record_submission<L>(
    log: &L,
    input_summary: &str,
    latency_ms: Option<f64>,
    feedback: &Feedback,
    predictions: &[(&ModelIdentity, f64)],
) -> ChargewatchResult<Vec<PredictionEvent>>
where
    L: EventLog + ?Sized,
{
    let events: Vec<PredictionEvent> = predictions
        .iter()
        .map(|(identity, prediction)| {
            PredictionEvent::new(
                identity,
                input_summary,
                *prediction,
                latency_ms,
                feedback.score,
                Some(&feedback.text),
            )
        })
        .collect();

    log.append(&events)?;
    tracing::info!(rows = events.len(), "Recorded feedback submission");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryLog {
        appends: RefCell<Vec<Vec<PredictionEvent>>>,
    }

    impl EventLog for MemoryLog {
        fn append(&self, events: &[PredictionEvent]) -> ChargewatchResult<()> {
            self.appends.borrow_mut().push(events.to_vec());
            Ok(())
        }

        fn load(&self) -> ChargewatchResult<Vec<PredictionEvent>> {
            Ok(self.appends.borrow().iter().flatten().cloned().collect())
        }
    }

    #[test]
    fn feedback_coerces_missing_text_to_empty() {
        let feedback = Feedback::new(None, None).unwrap();
        assert_eq!(feedback.score(), &None);
        assert_eq!(feedback.text(), "");
    }

    #[test]
    fn feedback_rejects_scores_outside_one_to_five() {
        assert!(Feedback::new(Some(0), None).is_err());
        assert!(Feedback::new(Some(6), Some("great")).is_err());
        assert!(Feedback::new(Some(5), Some("great")).is_ok());
    }

    #[test]
    fn submission_is_a_single_append() {
        let log = MemoryLog::default();
        let feedback = Feedback::new(Some(2), Some("v2 seems off")).unwrap();
        let baseline = ModelIdentity::baseline();
        let improved = ModelIdentity::improved();

        let events = record_submission(
            &log,
            "age=30",
            Some(3.5),
            &feedback,
            &[(&baseline, 10_000.0), (&improved, 12_500.0)],
        )
        .unwrap();

        let appends = log.appends.borrow();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0], events);
        assert_eq!(events[0].model_version, "v1_old");
        assert_eq!(events[1].model_version, "v2_new");
        assert!(events.iter().all(|e| e.latency_ms == Some(3.5)));
        assert!(events.iter().all(|e| e.feedback_text == "v2 seems off"));
    }

    #[test]
    fn record_returns_the_written_event() {
        let log = MemoryLog::default();
        let feedback = Feedback::new(Some(5), None).unwrap();

        let event = record(
            &log,
            &ModelIdentity::new("v3_exp", "experimental"),
            "age=41",
            9_999.99,
            None,
            &feedback,
        )
        .unwrap();

        assert_eq!(log.load().unwrap(), vec![event.clone()]);
        assert_eq!(event.model_type, "experimental");
        assert_eq!(event.latency_ms, None);
        assert_eq!(event.feedback_score.map(FeedbackScore::value), Some(5));
    }
}
