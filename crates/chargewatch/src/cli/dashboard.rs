//! Dashboard launch command handler.

use chargewatch::{
    ChargewatchConfig, ChargewatchResult, CsvEventLog, CsvMonitorBackend, DashboardSettings,
    run_dashboard,
};

/// Launch the monitoring dashboard over the configured log.
pub fn launch_dashboard(config: &ChargewatchConfig) -> ChargewatchResult<()> {
    tracing::info!(log_path = %config.log_path().display(), "Launching dashboard");

    let mut backend = CsvMonitorBackend::new(CsvEventLog::new(config.log_path()));
    let settings = DashboardSettings {
        tick_rate_ms: *config.tick_rate_ms(),
        comment_limit: *config.recent_comment_limit(),
    };
    run_dashboard(&mut backend, settings)
}
