//! chargewatch - insurance charge prediction with live feedback monitoring
//!
//! Two regression models predict yearly insurance charges for the same
//! input. Every feedback submission appends one event per model to a shared
//! CSV log, and the monitoring views aggregate that log per model version.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chargewatch::{
//!     ChargewatchConfig, CsvEventLog, Feedback, InsuranceInput, LazyModelPair,
//!     PredictionSession,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChargewatchConfig::load()?;
//! let models = LazyModelPair::new(
//!     config.models().baseline().source(),
//!     config.models().improved().source(),
//! );
//!
//! let mut session = PredictionSession::new(models.get()?, CsvEventLog::new(config.log_path()));
//! session.run_prediction(InsuranceInput::builder().age(45).build()?);
//! session.submit_feedback(&Feedback::new(Some(5), Some("spot on"))?)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `chargewatch_error` - Error types
//! - `chargewatch_core` - Input record, prediction event, formatting
//! - `chargewatch_models` - Linear predictors, artifacts, training
//! - `chargewatch_log` - CSV event log
//! - `chargewatch_monitor` - Aggregation, filtering, recent comments
//! - `chargewatch_tui` - Terminal dashboard
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod session;

pub use config::{ChargewatchConfig, ModelConfig, ModelsConfig};
pub use observability::{ObservabilityConfig, init_observability};
pub use session::{PredictionOutcome, PredictionSession};

// Re-export error types
pub use chargewatch_error::{
    ChargewatchError, ChargewatchErrorKind, ChargewatchResult, ConfigError, JsonError, LogError,
    LogErrorKind, ModelError, ModelErrorKind, TuiError, TuiErrorKind, ValidationError,
    ValidationErrorKind,
};

// Re-export core types
pub use chargewatch_core::{
    AGE_RANGE, BMI_RANGE, CHILDREN_RANGE, EVENT_COLUMNS, FeedbackScore, InsuranceInput,
    InsuranceInputBuilder, ModelIdentity, PredictionEvent, Region, Sex, Smoker, format_dollars,
    format_timestamp, parse_timestamp,
};

// Re-export models
pub use chargewatch_models::{
    ChargePredictor, Feature, FeatureSet, InputField, LazyModelPair, LinearChargeModel, ModelPair,
    ModelSource, PairPrediction, TrainingRecord, fit, load_training_data,
};

// Re-export the event log
pub use chargewatch_log::{
    CachedEventLog, CsvEventLog, EventLog, Feedback, record, record_submission,
};

// Re-export monitoring views
pub use chargewatch_monitor::{
    DEFAULT_COMMENT_LIMIT, KeyMetrics, ModelFilter, ModelSummary, MonitorSnapshot, filter_events,
    key_metrics, model_versions, recent_comments, summarize_by_version,
};

// Re-export the dashboard
pub use chargewatch_tui::{
    App, CsvMonitorBackend, DashboardSettings, MonitorBackend, Tab, run_dashboard,
};
