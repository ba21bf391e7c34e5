//! Tests for the model pair and its lazy loader.

use chargewatch_core::{InsuranceInput, ModelIdentity};
use chargewatch_models::{
    ChargePredictor, FeatureSet, LazyModelPair, LinearChargeModel, ModelPair, ModelSource,
};
use tempfile::TempDir;

struct Fixed(f64);

impl ChargePredictor for Fixed {
    fn predict(&self, _input: &InsuranceInput) -> f64 {
        self.0
    }
}

fn write_artifacts(dir: &TempDir) -> (ModelSource, ModelSource) {
    let baseline = dir.path().join("v1.json");
    let improved = dir.path().join("v2.json");
    LinearChargeModel::new(FeatureSet::baseline(), vec![1.0, 0.0, 0.0], 100.0)
        .unwrap()
        .save(&baseline)
        .unwrap();
    LinearChargeModel::new(FeatureSet::baseline(), vec![0.0, 0.0, 10.0], 5.0)
        .unwrap()
        .save(&improved)
        .unwrap();
    (
        ModelSource {
            identity: ModelIdentity::baseline(),
            artifact: baseline,
        },
        ModelSource {
            identity: ModelIdentity::improved(),
            artifact: improved,
        },
    )
}

#[test]
fn test_pair_runs_both_predictors() {
    let pair = ModelPair::new(
        ModelIdentity::baseline(),
        Box::new(Fixed(10_000.0)),
        ModelIdentity::improved(),
        Box::new(Fixed(25_000.0)),
    );

    let prediction = pair.predict(&InsuranceInput::default());
    assert_eq!(prediction.baseline, 10_000.0);
    assert_eq!(prediction.improved, 25_000.0);
    assert!(prediction.latency_ms >= 0.0);
    assert_eq!(pair.baseline_identity().version(), "v1_old");
    assert_eq!(pair.improved_identity().model_type(), "improved");
}

#[test]
fn test_lazy_pair_loads_on_first_use() {
    let temp_dir = TempDir::new().unwrap();
    let (baseline, improved) = write_artifacts(&temp_dir);
    let pair = LazyModelPair::new(baseline, improved);
    assert!(!pair.is_loaded());

    let input = InsuranceInput::builder().age(40).children(2).build().unwrap();
    let prediction = pair.get().unwrap().predict(&input);
    assert!(pair.is_loaded());
    assert_eq!(prediction.baseline, 140.0);
    assert_eq!(prediction.improved, 25.0);
}

#[test]
fn test_lazy_pair_reloads_after_invalidate() {
    let temp_dir = TempDir::new().unwrap();
    let (baseline, improved) = write_artifacts(&temp_dir);
    let baseline_path = baseline.artifact.clone();
    let mut pair = LazyModelPair::new(baseline, improved);
    pair.get().unwrap();

    LinearChargeModel::new(FeatureSet::baseline(), vec![0.0, 0.0, 0.0], 7.0)
        .unwrap()
        .save(&baseline_path)
        .unwrap();
    let input = InsuranceInput::default();
    assert_eq!(pair.get().unwrap().predict(&input).baseline, 130.0);

    pair.invalidate();
    assert!(!pair.is_loaded());
    assert_eq!(pair.get().unwrap().predict(&input).baseline, 7.0);
}

#[test]
fn test_lazy_pair_reports_missing_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let (mut baseline, improved) = write_artifacts(&temp_dir);
    baseline.artifact = temp_dir.path().join("gone.json");
    let pair = LazyModelPair::new(baseline, improved);

    let err = pair.get().unwrap_err();
    assert!(err.to_string().contains("gone.json"));
    assert!(!pair.is_loaded());
}
