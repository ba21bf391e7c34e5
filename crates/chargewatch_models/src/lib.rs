//! Charge predictors for chargewatch.
//!
//! Predictors are opaque to the rest of the workspace: anything that maps an
//! [`InsuranceInput`](chargewatch_core::InsuranceInput) to a dollar amount
//! implements [`ChargePredictor`]. The shipped implementation is
//! [`LinearChargeModel`], a linear regression over an explicit feature
//! encoding, stored as a JSON artifact.
//!
//! # Example
//!
//! ```rust
//! use chargewatch_core::InsuranceInput;
//! use chargewatch_models::{ChargePredictor, FeatureSet, LinearChargeModel};
//!
//! let model = LinearChargeModel::new(
//!     FeatureSet::baseline(),
//!     vec![240.0, 330.0, 540.0],
//!     -6_900.0,
//! )
//! .unwrap();
//!
//! let input = InsuranceInput::default();
//! let charges = model.predict(&input);
//! assert!((charges - (-6_900.0 + 240.0 * 30.0 + 330.0 * 27.5)).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chargewatch_core::InsuranceInput;

mod features;
mod linear;
mod pair;
mod training;

pub use chargewatch_error::{ModelError, ModelErrorKind};
pub use features::{Feature, FeatureSet, InputField};
pub use linear::LinearChargeModel;
pub use pair::{LazyModelPair, ModelPair, ModelSource, PairPrediction};
pub use training::{TrainingRecord, fit, load_training_data};

/// A trained model mapping one input record to predicted yearly charges.
pub trait ChargePredictor: Send + Sync {
    /// Predicted charges in dollars.
    fn predict(&self, input: &InsuranceInput) -> f64;
}
