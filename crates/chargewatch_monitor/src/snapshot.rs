//! Everything the dashboard and CLI render, computed in one pass.

use crate::{
    KeyMetrics, ModelFilter, ModelSummary, filter_events, key_metrics, model_versions,
    recent_comments, summarize_by_version,
};
use chargewatch_core::PredictionEvent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Derived monitoring views for one filter selection.
///
/// Headline metrics and raw rows follow the filter; the per-version
/// comparison and recent comments always cover every version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSnapshot {
    /// Selected filter, rendered (`All` or a version)
    pub filter: String,
    /// Every version present in the log, sorted
    pub versions: Vec<String>,
    /// Headline metrics for the filtered rows
    pub metrics: KeyMetrics,
    /// Per-version aggregates over all rows
    pub summaries: BTreeMap<String, ModelSummary>,
    /// Newest commented rows over all versions
    pub recent_comments: Vec<PredictionEvent>,
    /// Filtered rows, timestamp ascending
    pub rows: Vec<PredictionEvent>,
}

impl MonitorSnapshot {
    /// Build every view from events sorted by timestamp ascending.
    #[tracing::instrument(skip(events, filter), fields(rows = events.len(), filter = %filter))]
    pub fn build(events: &[PredictionEvent], filter: &ModelFilter, comment_limit: usize) -> Self {
        let rows: Vec<PredictionEvent> = filter_events(events, filter)
            .into_iter()
            .cloned()
            .collect();
        Self {
            filter: filter.to_string(),
            versions: model_versions(events),
            metrics: key_metrics(&rows),
            summaries: summarize_by_version(events),
            recent_comments: recent_comments(events, comment_limit)
                .into_iter()
                .cloned()
                .collect(),
            rows,
        }
    }

    /// Whether there is nothing logged at all.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
