//! Which trained predictor produced an event.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Version and type labels written alongside every prediction.
///
/// Both labels are free-form; the defaults match the two shipped models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ModelIdentity {
    /// Model version, e.g. `v1_old`
    version: String,
    /// Model type, e.g. `baseline`
    model_type: String,
}

impl ModelIdentity {
    /// Create an identity from its two labels.
    pub fn new(version: impl Into<String>, model_type: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            model_type: model_type.into(),
        }
    }

    /// Identity of the age/bmi/children model.
    pub fn baseline() -> Self {
        Self::new("v1_old", "baseline")
    }

    /// Identity of the model using all six inputs.
    pub fn improved() -> Self {
        Self::new("v2_new", "improved")
    }
}
