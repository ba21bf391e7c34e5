//! Tests for event and input serialization.

use chargewatch_core::{
    FeedbackScore, InsuranceInput, ModelIdentity, PredictionEvent, Region, Sex, Smoker,
};
use chrono::{TimeZone, Utc};

#[test]
fn test_event_json_uses_log_encoding() {
    let event = PredictionEvent::new(
        &ModelIdentity::improved(),
        "age=30, sex=male, bmi=27.5, children=0, smoker=yes, region=northeast",
        31_204.125,
        None,
        Some(FeedbackScore::new(3).unwrap()),
        Some("too high"),
    )
    .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["timestamp"], "2025-01-02T03:04:05.000000Z");
    assert_eq!(json["model_version"], "v2_new");
    assert_eq!(json["model_type"], "improved");
    assert_eq!(json["feedback_score"], 3);
    assert!(json["latency_ms"].is_null());

    let back: PredictionEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_feedback_score_rejects_out_of_range_on_deserialize() {
    let result: Result<FeedbackScore, _> = serde_json::from_str("6");
    assert!(result.is_err());

    let score: FeedbackScore = serde_json::from_str("1").unwrap();
    assert_eq!(score.value(), 1);
}

#[test]
fn test_input_serializes_lowercase_labels() {
    let input = InsuranceInput::builder()
        .sex(Sex::Female)
        .smoker(Smoker::No)
        .region(Region::Northwest)
        .build()
        .unwrap();

    let json = serde_json::to_value(input).unwrap();
    assert_eq!(json["sex"], "female");
    assert_eq!(json["smoker"], "no");
    assert_eq!(json["region"], "northwest");
}

#[test]
fn test_comment_detection_ignores_whitespace() {
    let mut event = PredictionEvent::new(&ModelIdentity::baseline(), "", 1.0, None, None, None);
    assert!(!event.has_comment());

    event.feedback_text = "  \n\t ".to_string();
    assert!(!event.has_comment());

    event.feedback_text = " ok ".to_string();
    assert!(event.has_comment());
}
