//! Tests for monitoring aggregates.

use chargewatch_core::{FeedbackScore, ModelIdentity, PredictionEvent};
use chargewatch_monitor::{
    DEFAULT_COMMENT_LIMIT, ModelFilter, MonitorSnapshot, filter_events, key_metrics,
    model_versions, recent_comments, summarize_by_version,
};
use chrono::{Duration, TimeZone, Utc};

fn event(
    version: &str,
    minute: i64,
    score: Option<u8>,
    latency: Option<f64>,
    text: &str,
) -> PredictionEvent {
    let base = Utc.with_ymd_and_hms(2025, 2, 14, 18, 0, 0).unwrap();
    PredictionEvent::new(
        &ModelIdentity::new(version, "test"),
        "age=30",
        10_000.0,
        latency,
        score.map(|s| FeedbackScore::new(s).unwrap()),
        Some(text),
    )
    .with_timestamp(base + Duration::minutes(minute))
}

fn two_versions() -> Vec<PredictionEvent> {
    vec![
        event("A", 0, Some(5), Some(2.0), ""),
        event("B", 1, Some(2), Some(6.0), "too low"),
        event("A", 2, Some(3), None, "fine"),
        event("B", 3, None, Some(4.0), ""),
        event("A", 4, None, Some(4.0), "   "),
    ]
}

#[test]
fn test_empty_log_has_empty_aggregates() {
    let events: Vec<PredictionEvent> = Vec::new();

    assert!(summarize_by_version(&events).is_empty());
    assert!(model_versions(&events).is_empty());
    assert!(recent_comments(&events, DEFAULT_COMMENT_LIMIT).is_empty());

    let metrics = key_metrics(&events);
    assert_eq!(metrics.total_predictions, 0);
    assert_eq!(metrics.feedback_display(), "N/A");
    assert_eq!(metrics.latency_display(), "N/A");

    assert!(MonitorSnapshot::build(&events, &ModelFilter::All, 10).is_empty());
}

#[test]
fn test_mean_score_excludes_absent_values() {
    let summaries = summarize_by_version(&two_versions());

    let a = &summaries["A"];
    assert_eq!(a.count, 3);
    assert_eq!(a.avg_feedback_score, Some(4.0));
    assert_eq!(a.avg_latency_ms, Some(3.0));

    let b = &summaries["B"];
    assert_eq!(b.count, 2);
    assert_eq!(b.avg_feedback_score, Some(2.0));
    assert_eq!(b.avg_latency_ms, Some(5.0));
}

#[test]
fn test_version_without_scores_has_no_mean() {
    let events = vec![event("C", 0, None, None, "")];
    let summaries = summarize_by_version(&events);
    assert_eq!(summaries["C"].avg_feedback_score, None);
    assert_eq!(summaries["C"].avg_latency_ms, None);
}

#[test]
fn test_filter_by_version_and_all() {
    let events = two_versions();

    let only_a = filter_events(&events, &"A".parse().unwrap());
    assert_eq!(only_a.len(), 3);
    assert!(only_a.iter().all(|e| e.model_version == "A"));

    let all = filter_events(&events, &"all".parse().unwrap());
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    assert!(filter_events(&events, &ModelFilter::Version("Z".into())).is_empty());
}

#[test]
fn test_recent_comments_skip_blank_and_are_newest_first() {
    let events = two_versions();
    let comments = recent_comments(&events, DEFAULT_COMMENT_LIMIT);
    let texts: Vec<&str> = comments.iter().map(|e| e.feedback_text.as_str()).collect();
    assert_eq!(texts, vec!["fine", "too low"]);
}

#[test]
fn test_recent_comments_capped_at_limit() {
    let events: Vec<PredictionEvent> = (0..15)
        .map(|i| event("A", i, Some(4), None, &format!("comment {}", i)))
        .collect();

    let comments = recent_comments(&events, DEFAULT_COMMENT_LIMIT);
    assert_eq!(comments.len(), 10);
    assert_eq!(comments[0].feedback_text, "comment 14");
    assert_eq!(comments[9].feedback_text, "comment 5");
}

#[test]
fn test_snapshot_filters_metrics_but_not_comparison() {
    let events = two_versions();
    let snapshot = MonitorSnapshot::build(&events, &ModelFilter::Version("B".into()), 10);

    assert_eq!(snapshot.filter, "B");
    assert_eq!(snapshot.versions, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(snapshot.metrics.total_predictions, 2);
    assert_eq!(snapshot.metrics.feedback_display(), "2.00");
    assert_eq!(snapshot.metrics.latency_display(), "5.0");
    assert_eq!(snapshot.summaries.len(), 2);
    assert_eq!(snapshot.recent_comments.len(), 2);
    assert!(snapshot.rows.iter().all(|e| e.model_version == "B"));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["summaries"]["A"]["avg_feedback_score"], 4.0);
}
