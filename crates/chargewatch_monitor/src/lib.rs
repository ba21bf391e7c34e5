//! Monitoring views over logged prediction events.
//!
//! Everything here is derived at read time and never persisted:
//! per-version means, filtered selections, headline metrics and the most
//! recent comments.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comments;
mod filter;
mod mean;
mod snapshot;
mod summary;

pub use comments::{DEFAULT_COMMENT_LIMIT, recent_comments};
pub use filter::{ModelFilter, filter_events, model_versions};
pub use snapshot::MonitorSnapshot;
pub use summary::{KeyMetrics, ModelSummary, key_metrics, summarize_by_version};
