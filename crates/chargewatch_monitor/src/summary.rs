//! Per-version and headline aggregates.

use crate::mean::Mean;
use chargewatch_core::PredictionEvent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregates for one model version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    /// The version these numbers describe
    pub model_version: String,
    /// Number of logged events
    pub count: usize,
    /// Mean feedback score over events that have one
    pub avg_feedback_score: Option<f64>,
    /// Mean latency over events that have one
    pub avg_latency_ms: Option<f64>,
}

/// Group events by `model_version` and average score and latency.
///
/// Absent values are left out of each mean rather than counted as zero.
#[tracing::instrument(skip_all, fields(rows = events.len()))]
pub fn summarize_by_version(events: &[PredictionEvent]) -> BTreeMap<String, ModelSummary> {
    let mut groups: BTreeMap<&str, (usize, Mean, Mean)> = BTreeMap::new();
    for event in events {
        let (count, score, latency) = groups.entry(event.model_version.as_str()).or_default();
        *count += 1;
        score.push(event.feedback_score.map(f64::from));
        latency.push(event.latency_ms);
    }

    groups
        .into_iter()
        .map(|(version, (count, score, latency))| {
            (
                version.to_string(),
                ModelSummary {
                    model_version: version.to_string(),
                    count,
                    avg_feedback_score: score.value(),
                    avg_latency_ms: latency.value(),
                },
            )
        })
        .collect()
}

/// Headline numbers for a selection of events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KeyMetrics {
    /// Number of events in the selection
    pub total_predictions: usize,
    /// Mean feedback score, `None` when no event has one
    pub avg_feedback_score: Option<f64>,
    /// Mean latency, `None` when no event has one
    pub avg_latency_ms: Option<f64>,
}

impl KeyMetrics {
    /// Average score to two decimals, or `N/A`.
    pub fn feedback_display(&self) -> String {
        self.avg_feedback_score
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Average latency to one decimal, or `N/A`.
    pub fn latency_display(&self) -> String {
        self.avg_latency_ms
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Compute [`KeyMetrics`] over any selection of events.
pub fn key_metrics<'a>(events: impl IntoIterator<Item = &'a PredictionEvent>) -> KeyMetrics {
    let mut total = 0;
    let mut score = Mean::default();
    let mut latency = Mean::default();
    for event in events {
        total += 1;
        score.push(event.feedback_score.map(f64::from));
        latency.push(event.latency_ms);
    }
    KeyMetrics {
        total_predictions: total,
        avg_feedback_score: score.value(),
        avg_latency_ms: latency.value(),
    }
}
