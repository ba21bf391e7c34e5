//! Tests for the CSV event log backend.

use chargewatch_core::{EVENT_COLUMNS, FeedbackScore, ModelIdentity, PredictionEvent};
use chargewatch_log::{
    CachedEventLog, CsvEventLog, EventLog, Feedback, LogErrorKind, record, record_submission,
};
use chargewatch_error::ChargewatchErrorKind;
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

const SUMMARY: &str = "age=30, sex=male, bmi=27.5, children=0, smoker=yes, region=northeast";

fn log_in(dir: &TempDir) -> CsvEventLog {
    CsvEventLog::new(dir.path().join("monitoring_logs.csv"))
}

fn event_at(version: &str, minutes: i64, score: Option<u8>, text: &str) -> PredictionEvent {
    let base = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    PredictionEvent::new(
        &ModelIdentity::new(version, "baseline"),
        SUMMARY,
        12_000.0 + minutes as f64,
        Some(1.5),
        score.map(|s| FeedbackScore::new(s).unwrap()),
        Some(text),
    )
    .with_timestamp(base + Duration::minutes(minutes))
}

#[test]
fn test_missing_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);

    assert!(!log.exists());
    assert!(log.load().unwrap().is_empty());
}

#[test]
fn test_record_then_load_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    let feedback = Feedback::new(Some(4), Some("Reasonable, a bit \"high\", maybe\nsecond line")).unwrap();

    let written = record(
        &log,
        &ModelIdentity::baseline(),
        SUMMARY,
        13_256.419_87,
        Some(0.734),
        &feedback,
    )
    .unwrap();

    let loaded = log.load().unwrap();
    assert_eq!(loaded.len(), 1);
    let event = &loaded[0];
    assert_eq!(event, &written);
    assert_eq!(event.model_version, "v1_old");
    assert_eq!(event.model_type, "baseline");
    assert_eq!(event.input_summary, SUMMARY);
    assert!((event.predicted_charges - 13_256.42).abs() < 0.005);
    assert_eq!(event.feedback_score.map(FeedbackScore::value), Some(4));
    assert_eq!(event.feedback_text, "Reasonable, a bit \"high\", maybe\nsecond line");
}

#[test]
fn test_absent_values_round_trip_as_empty_cells() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);

    let written = record(
        &log,
        &ModelIdentity::improved(),
        SUMMARY,
        20_000.0,
        None,
        &Feedback::new(None, None).unwrap(),
    )
    .unwrap();

    let raw = std::fs::read_to_string(log.path()).unwrap();
    let data_line = raw.lines().nth(1).unwrap();
    assert!(data_line.ends_with(",20000.0,,,"), "unexpected row: {}", data_line);

    let loaded = log.load().unwrap();
    assert_eq!(loaded, vec![written]);
    assert_eq!(loaded[0].latency_ms, None);
    assert_eq!(loaded[0].feedback_score, None);
    assert_eq!(loaded[0].feedback_text, "");
}

#[test]
fn test_n_records_produce_n_rows_and_one_header() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    let feedback = Feedback::new(Some(3), None).unwrap();

    for i in 0..5 {
        record(
            &log,
            &ModelIdentity::baseline(),
            SUMMARY,
            1_000.0 * f64::from(i),
            Some(1.0),
            &feedback,
        )
        .unwrap();
    }

    let raw = std::fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], EVENT_COLUMNS.join(","));
    assert_eq!(raw.matches("timestamp,model_version").count(), 1);

    let charges: Vec<f64> = log
        .load()
        .unwrap()
        .iter()
        .map(|e| e.predicted_charges)
        .collect();
    assert_eq!(charges, vec![0.0, 1_000.0, 2_000.0, 3_000.0, 4_000.0]);
}

#[test]
fn test_load_sorts_by_timestamp_ascending() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);

    log.append(&[event_at("v1_old", 30, None, ""), event_at("v2_new", 10, None, "")])
        .unwrap();
    log.append(&[event_at("v1_old", 20, None, "")]).unwrap();

    let minutes: Vec<u32> = log
        .load()
        .unwrap()
        .iter()
        .map(|e| chrono::Timelike::minute(&e.timestamp))
        .collect();
    assert_eq!(minutes, vec![10, 20, 30]);
}

#[test]
fn test_submission_appends_both_rows_together() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    let baseline = ModelIdentity::baseline();
    let improved = ModelIdentity::improved();
    let feedback = Feedback::new(Some(5), Some("great")).unwrap();

    record_submission(
        &log,
        SUMMARY,
        Some(2.25),
        &feedback,
        &[(&baseline, 11_000.0), (&improved, 27_500.0)],
    )
    .unwrap();

    let loaded = log.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].model_version, "v1_old");
    assert_eq!(loaded[1].model_version, "v2_new");
    assert_eq!(loaded[0].input_summary, loaded[1].input_summary);
    assert_eq!(loaded[0].latency_ms, Some(2.25));
    assert_eq!(loaded[1].latency_ms, Some(2.25));
}

#[test]
fn test_append_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let log = CsvEventLog::new(temp_dir.path().join("nested/dir/monitoring_logs.csv"));

    log.append(&[event_at("v1_old", 0, Some(1), "")]).unwrap();

    assert!(log.exists());
    assert_eq!(log.load().unwrap().len(), 1);
}

#[test]
fn test_empty_existing_file_gets_header() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    std::fs::write(log.path(), "").unwrap();

    assert!(log.load().unwrap().is_empty());
    log.append(&[event_at("v1_old", 0, None, "")]).unwrap();

    let raw = std::fs::read_to_string(log.path()).unwrap();
    assert!(raw.starts_with("timestamp,"));
    assert_eq!(log.load().unwrap().len(), 1);
}

#[test]
fn test_reads_naive_timestamps_from_older_logs() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    std::fs::write(
        log.path(),
        "timestamp,model_version,model_type,input_summary,predicted_charges,latency_ms,feedback_score,feedback_text\n\
         2025-01-10T12:30:45.123456,v2_new,improved,\"age=30, sex=male\",31000.5,0.8,5,\n\
         2025-01-10T12:30:44.000001,v1_old,baseline,\"age=30, sex=male\",9000.25,0.8,,meh\n",
    )
    .unwrap();

    let loaded = log.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].model_version, "v1_old");
    assert_eq!(loaded[0].feedback_score, None);
    assert_eq!(loaded[0].feedback_text, "meh");
    assert_eq!(loaded[1].feedback_score.map(FeedbackScore::value), Some(5));
}

#[test]
fn test_header_mismatch_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    std::fs::write(log.path(), "time,version\n2025-01-01T00:00:00Z,v1\n").unwrap();

    let err = log.load().unwrap_err();
    match err.kind() {
        ChargewatchErrorKind::Log(log_err) => {
            assert!(matches!(log_err.kind, LogErrorKind::HeaderMismatch(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_truncated_row_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    log.append(&[event_at("v1_old", 0, None, "")]).unwrap();

    let mut raw = std::fs::read_to_string(log.path()).unwrap();
    raw.push_str("2025-05-01T09:05:00.000000Z,v2_new\n");
    std::fs::write(log.path(), raw).unwrap();

    let err = log.load().unwrap_err();
    assert!(err.to_string().contains("line 3"), "{}", err);
}

#[test]
fn test_row_cut_inside_comment_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    log.append(&[event_at("v1_old", 0, Some(5), "the improved model looks great")])
        .unwrap();

    let raw = std::fs::read(log.path()).unwrap();
    std::fs::write(log.path(), &raw[..raw.len() - 12]).unwrap();

    let err = log.load().unwrap_err();
    match err.kind() {
        ChargewatchErrorKind::Log(e) => assert!(matches!(e.kind, LogErrorKind::Parse(_))),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("line 2: truncated final row"), "{}", err);
}

#[test]
fn test_cached_log_reloads_only_after_change() {
    let temp_dir = TempDir::new().unwrap();
    let log = log_in(&temp_dir);
    let mut cached = CachedEventLog::new(log.clone());

    assert!(cached.events().unwrap().is_empty());
    assert!(cached.events().unwrap().is_empty());
    assert_eq!(cached.loads(), 1);

    log.append(&[event_at("v1_old", 0, Some(4), "")]).unwrap();
    assert!(cached.is_stale());
    assert_eq!(cached.events().unwrap().len(), 1);
    assert_eq!(cached.loads(), 2);

    assert_eq!(cached.events().unwrap().len(), 1);
    assert_eq!(cached.loads(), 2);

    cached.invalidate();
    cached.events().unwrap();
    assert_eq!(cached.loads(), 3);
}
