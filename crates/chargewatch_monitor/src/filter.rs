//! Model-version selection.

use chargewatch_core::PredictionEvent;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

/// Which model versions a view covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelFilter {
    /// Every version
    #[default]
    #[display("All")]
    All,
    /// A single version
    #[display("{}", _0)]
    Version(String),
}

impl ModelFilter {
    /// Whether `event` belongs to the selection.
    pub fn matches(&self, event: &PredictionEvent) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Version(version) => event.model_version == *version,
        }
    }
}

impl FromStr for ModelFilter {
    type Err = Infallible;

    /// `all` (any case) selects everything; anything else names a version.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(ModelFilter::All)
        } else {
            Ok(ModelFilter::Version(s.to_string()))
        }
    }
}

/// Events matching `filter`, keeping their order.
pub fn filter_events<'a>(
    events: &'a [PredictionEvent],
    filter: &ModelFilter,
) -> Vec<&'a PredictionEvent> {
    events.iter().filter(|event| filter.matches(event)).collect()
}

/// Distinct model versions, sorted.
pub fn model_versions(events: &[PredictionEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| event.model_version.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
