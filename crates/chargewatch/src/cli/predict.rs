//! `predict` and `record` command handlers.

use super::commands::{InputArgs, OutputFormat};
use super::output::print_json;
use chargewatch::{
    ChargewatchConfig, ChargewatchResult, CsvEventLog, Feedback, LazyModelPair, PredictionSession,
};
use serde_json::json;

fn load_models(config: &ChargewatchConfig) -> LazyModelPair {
    LazyModelPair::new(
        config.models().baseline().source(),
        config.models().improved().source(),
    )
}

/// Run both models and print the predictions.
#[tracing::instrument(skip_all)]
pub fn predict(
    config: &ChargewatchConfig,
    input: &InputArgs,
    format: OutputFormat,
) -> ChargewatchResult<()> {
    let models = load_models(config);
    let mut session = PredictionSession::new(models.get()?, CsvEventLog::new(config.log_path()));
    let outcome = session.run_prediction(input.to_input()?).clone();

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Human => {
            println!("Input: {}", outcome.input_summary);
            for line in outcome.display_lines(models.get()?) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Run both models, then log one row per model with the feedback.
#[tracing::instrument(skip_all, fields(log_path = %config.log_path().display()))]
pub fn record_feedback(
    config: &ChargewatchConfig,
    input: &InputArgs,
    score: Option<u8>,
    comment: Option<&str>,
    format: OutputFormat,
) -> ChargewatchResult<()> {
    let feedback = Feedback::new(score, comment)?;
    let models = load_models(config);
    let pair = models.get()?;
    let mut session = PredictionSession::new(pair, CsvEventLog::new(config.log_path()));

    let outcome = session.run_prediction(input.to_input()?).clone();
    let events = session.submit_feedback(&feedback)?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "prediction": outcome,
            "events": events,
        }))?,
        OutputFormat::Human => {
            println!("Input: {}", outcome.input_summary);
            for line in outcome.display_lines(pair) {
                println!("{}", line);
            }
            println!(
                "Feedback and predictions have been saved to {}. \
                 You can now view them in the monitoring dashboard.",
                session.log().path().display()
            );
        }
    }
    Ok(())
}
