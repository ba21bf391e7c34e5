//! `summary`, `comments` and `logs` command handlers.

use super::commands::OutputFormat;
use super::output::{NO_LOGS_NOTICE, print_json};
use chargewatch::{
    ChargewatchConfig, ChargewatchResult, CsvEventLog, EventLog, ModelFilter, MonitorSnapshot,
    PredictionEvent, filter_events, format_dollars, format_timestamp, recent_comments,
};
use serde_json::json;

fn load_events(config: &ChargewatchConfig) -> ChargewatchResult<Vec<PredictionEvent>> {
    CsvEventLog::new(config.log_path()).load()
}

fn or_na(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Print key metrics for `filter` and the per-version comparison.
#[tracing::instrument(skip(config))]
pub fn show_summary(
    config: &ChargewatchConfig,
    filter: &ModelFilter,
    format: OutputFormat,
) -> ChargewatchResult<()> {
    let events = load_events(config)?;
    let snapshot = MonitorSnapshot::build(&events, filter, *config.recent_comment_limit());

    if format == OutputFormat::Json {
        return print_json(&json!({
            "filter": snapshot.filter,
            "versions": snapshot.versions,
            "metrics": snapshot.metrics,
            "summaries": snapshot.summaries,
        }));
    }

    if snapshot.is_empty() {
        println!("{}", NO_LOGS_NOTICE);
        return Ok(());
    }

    println!("Key Metrics ({})", snapshot.filter);
    println!("  Total Predictions:  {}", snapshot.metrics.total_predictions);
    println!("  Avg Feedback Score: {}", snapshot.metrics.feedback_display());
    println!("  Avg Latency (ms):   {}", snapshot.metrics.latency_display());
    println!();
    println!("Model Version Comparison (Aggregated)");
    println!(
        "{:<16} {:>11} {:>18} {:>14}",
        "model_version", "predictions", "avg_feedback_score", "avg_latency_ms"
    );
    for summary in snapshot.summaries.values() {
        println!(
            "{:<16} {:>11} {:>18} {:>14}",
            summary.model_version,
            summary.count,
            or_na(summary.avg_feedback_score, 2),
            or_na(summary.avg_latency_ms, 1)
        );
    }
    Ok(())
}

/// Print the newest non-empty comments.
#[tracing::instrument(skip(config))]
pub fn show_comments(
    config: &ChargewatchConfig,
    limit: Option<usize>,
    format: OutputFormat,
) -> ChargewatchResult<()> {
    let events = load_events(config)?;
    let limit = limit.unwrap_or(*config.recent_comment_limit());
    let comments = recent_comments(&events, limit);

    match format {
        OutputFormat::Json => print_json(&comments),
        OutputFormat::Human if events.is_empty() => {
            println!("{}", NO_LOGS_NOTICE);
            Ok(())
        }
        OutputFormat::Human if comments.is_empty() => {
            println!("No qualitative comments yet.");
            Ok(())
        }
        OutputFormat::Human => {
            for event in comments {
                let score = event
                    .feedback_score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "[{}] {} - Score: {}",
                    format_timestamp(&event.timestamp),
                    event.model_version,
                    score
                );
                println!("{}", event.feedback_text);
                println!("{:-<80}", "");
            }
            Ok(())
        }
    }
}

/// Print raw rows for `filter`, oldest first.
#[tracing::instrument(skip(config))]
pub fn show_logs(
    config: &ChargewatchConfig,
    filter: &ModelFilter,
    tail: Option<usize>,
    format: OutputFormat,
) -> ChargewatchResult<()> {
    let events = load_events(config)?;
    let rows = filter_events(&events, filter);
    let skip = tail.map_or(0, |n| rows.len().saturating_sub(n));
    let rows = &rows[skip..];

    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Human if events.is_empty() => {
            println!("{}", NO_LOGS_NOTICE);
            Ok(())
        }
        OutputFormat::Human => {
            for event in rows {
                println!(
                    "{}  {:<10} {:<9} {:>14}  {:>8}  {:>5}  {}  {}",
                    format_timestamp(&event.timestamp),
                    event.model_version,
                    event.model_type,
                    format_dollars(event.predicted_charges),
                    event
                        .latency_ms
                        .map(|v| format!("{:.1}ms", v))
                        .unwrap_or_default(),
                    event
                        .feedback_score
                        .map(|s| s.to_string())
                        .unwrap_or_default(),
                    event.input_summary,
                    event.feedback_text.replace('\n', " ")
                );
            }
            println!("Total: {} rows", rows.len());
            Ok(())
        }
    }
}
