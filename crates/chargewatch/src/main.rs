//! chargewatch CLI binary.
//!
//! This binary provides command-line access to chargewatch:
//! - Predict charges with the baseline and improved models
//! - Record predictions together with user feedback
//! - Summarize and browse the monitoring log
//! - Launch the monitoring dashboard
//! - Retrain both models

use chargewatch::{ChargewatchConfig, ObservabilityConfig, init_observability};
use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, launch_dashboard, predict, record_feedback, show_comments, show_logs,
        show_summary, train_models,
    };

    // Load .env if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "warn" };
    init_observability(
        &ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let mut config = ChargewatchConfig::resolve(cli.config.as_deref())?;
    if let Some(log_path) = cli.log_path {
        config = config.with_log_path(log_path);
    }
    tracing::debug!(?config, "Configuration loaded");

    // Execute the requested command
    match cli.command {
        Commands::Predict { input, format } => predict(&config, &input, format)?,

        Commands::Record {
            input,
            score,
            no_score,
            comment,
            format,
        } => {
            let score = (!no_score).then_some(score);
            record_feedback(&config, &input, score, comment.as_deref(), format)?;
        }

        Commands::Summary { model, format } => show_summary(&config, &model, format)?,

        Commands::Comments { limit, format } => show_comments(&config, limit, format)?,

        Commands::Logs {
            model,
            tail,
            format,
        } => show_logs(&config, &model, tail, format)?,

        Commands::Dashboard => launch_dashboard(&config)?,

        Commands::Train {
            data,
            baseline_out,
            improved_out,
        } => train_models(&config, &data, baseline_out, improved_out)?,
    }

    Ok(())
}
