//! The baseline/improved model pair the prediction surface runs.

use crate::{ChargePredictor, LinearChargeModel};
use chargewatch_core::{InsuranceInput, ModelIdentity};
use chargewatch_error::ChargewatchResult;
use derive_getters::Getters;
use serde::Serialize;
use std::sync::OnceLock;
use std::path::PathBuf;
use std::time::Instant;

/// Both predictions for one input, plus the time the two calls took.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairPrediction {
    /// Baseline model output
    pub baseline: f64,
    /// Improved model output
    pub improved: f64,
    /// Wall-clock milliseconds around both predictor calls
    pub latency_ms: f64,
}

/// Two predictors with the identities their events are logged under.
#[derive(Getters)]
pub struct ModelPair {
    baseline_identity: ModelIdentity,
    improved_identity: ModelIdentity,
    #[getter(skip)]
    baseline: Box<dyn ChargePredictor>,
    #[getter(skip)]
    improved: Box<dyn ChargePredictor>,
}

impl std::fmt::Debug for ModelPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPair")
            .field("baseline_identity", &self.baseline_identity)
            .field("improved_identity", &self.improved_identity)
            .finish_non_exhaustive()
    }
}

impl ModelPair {
    /// Pair two predictors with their identities.
    pub fn new(
        baseline_identity: ModelIdentity,
        baseline: Box<dyn ChargePredictor>,
        improved_identity: ModelIdentity,
        improved: Box<dyn ChargePredictor>,
    ) -> Self {
        Self {
            baseline_identity,
            improved_identity,
            baseline,
            improved,
        }
    }

    /// Run both predictors, timing the two calls together.
    #[tracing::instrument(skip(self, input))]
    pub fn predict(&self, input: &InsuranceInput) -> PairPrediction {
        let start = Instant::now();
        let baseline = self.baseline.predict(input);
        let improved = self.improved.predict(input);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(baseline, improved, latency_ms, "Predicted charges");
        PairPrediction {
            baseline,
            improved,
            latency_ms,
        }
    }
}

/// Where to find each model and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    /// Logged identity
    pub identity: ModelIdentity,
    /// JSON artifact path
    pub artifact: PathBuf,
}

/// A [`ModelPair`] loaded from artifacts on first use and kept until
/// [`invalidate`](Self::invalidate) is called.
#[derive(Debug)]
pub struct LazyModelPair {
    baseline: ModelSource,
    improved: ModelSource,
    loaded: OnceLock<ModelPair>,
}

impl LazyModelPair {
    /// Describe the artifacts; nothing is read yet.
    pub fn new(baseline: ModelSource, improved: ModelSource) -> Self {
        Self {
            baseline,
            improved,
            loaded: OnceLock::new(),
        }
    }

    /// Whether the artifacts have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// The loaded pair, reading both artifacts on the first call.
    pub fn get(&self) -> ChargewatchResult<&ModelPair> {
        if let Some(pair) = self.loaded.get() {
            return Ok(pair);
        }

        tracing::info!(
            baseline = %self.baseline.artifact.display(),
            improved = %self.improved.artifact.display(),
            "Loading model artifacts"
        );
        let pair = ModelPair::new(
            self.baseline.identity.clone(),
            Box::new(LinearChargeModel::load(&self.baseline.artifact)?),
            self.improved.identity.clone(),
            Box::new(LinearChargeModel::load(&self.improved.artifact)?),
        );
        Ok(self.loaded.get_or_init(|| pair))
    }

    /// Forget the loaded pair so the next [`get`](Self::get) re-reads the
    /// artifacts.
    pub fn invalidate(&mut self) {
        self.loaded.take();
    }
}
