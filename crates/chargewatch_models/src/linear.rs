//! Linear regression predictor and its JSON artifact.

use crate::{ChargePredictor, FeatureSet};
use chargewatch_core::InsuranceInput;
use chargewatch_error::{ChargewatchResult, ModelError, ModelErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `intercept + coefficients · encode(input)`.
///
/// # Artifact format
///
/// ```json
/// {
///   "features": [{"numeric": "age"}, {"one_hot": {"field": "smoker", "categories": ["yes"]}}],
///   "coefficients": [256.9, 23848.5],
///   "intercept": -11938.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct LinearChargeModel {
    /// Encoding applied to each input
    features: FeatureSet,
    /// One weight per design column
    coefficients: Vec<f64>,
    /// Constant term
    intercept: f64,
}

impl LinearChargeModel {
    /// Create a model, checking that the weights fit the encoding.
    pub fn new(
        features: FeatureSet,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> ChargewatchResult<Self> {
        let model = Self {
            features,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Read and validate a JSON artifact.
    #[tracing::instrument(fields(path = %path.as_ref().display()), skip(path))]
    pub fn load(path: impl AsRef<Path>) -> ChargewatchResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModelError::new(ModelErrorKind::ArtifactRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        })?;

        let model: Self = serde_json::from_str(&raw).map_err(|e| {
            ModelError::new(ModelErrorKind::InvalidArtifact(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        model.validate()?;

        tracing::debug!(columns = model.coefficients.len(), "Loaded model artifact");
        Ok(model)
    }

    /// Write the model as pretty-printed JSON, creating parent directories.
    #[tracing::instrument(fields(path = %path.as_ref().display()), skip(self, path))]
    pub fn save(&self, path: impl AsRef<Path>) -> ChargewatchResult<()> {
        let path = path.as_ref();
        let write_error = |reason: String| {
            ModelError::new(ModelErrorKind::ArtifactWrite {
                path: path.display().to_string(),
                reason,
            })
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| write_error(e.to_string()))?;

        tracing::info!("Saved model artifact");
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Some(problem) = self.features.misconfiguration() {
            return Err(ModelError::new(ModelErrorKind::InvalidArtifact(problem)));
        }
        let width = self.features.width();
        if self.coefficients.len() != width {
            return Err(ModelError::new(ModelErrorKind::InvalidArtifact(format!(
                "expected {} coefficients for {} design columns, found {}",
                width,
                width,
                self.coefficients.len()
            ))));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::new(ModelErrorKind::InvalidArtifact(
                "weights must be finite".to_string(),
            )));
        }
        Ok(())
    }
}

impl ChargePredictor for LinearChargeModel {
    fn predict(&self, input: &InsuranceInput) -> f64 {
        self.features
            .encode(input)
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (x, w)| acc + x * w)
    }
}
