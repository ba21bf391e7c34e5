//! `train` command handler.

use chargewatch::{
    ChargewatchConfig, ChargewatchResult, FeatureSet, LinearChargeModel, ModelConfig, fit,
    load_training_data,
};
use std::path::{Path, PathBuf};

/// Fit the baseline and improved models on `data` and write both artifacts.
#[tracing::instrument(skip(config))]
pub fn train_models(
    config: &ChargewatchConfig,
    data: &Path,
    baseline_out: Option<PathBuf>,
    improved_out: Option<PathBuf>,
) -> ChargewatchResult<()> {
    let records = load_training_data(data)?;
    println!("Loaded {} training rows from {}", records.len(), data.display());

    let models = config.models();
    let jobs = [
        (models.baseline(), FeatureSet::baseline(), baseline_out),
        (models.improved(), FeatureSet::improved(), improved_out),
    ];
    for (model_config, features, out) in jobs {
        let model = fit(features, &records)?;
        let path = out.unwrap_or_else(|| model_config.artifact().clone());
        model.save(&path)?;
        report(model_config, &model, &path);
    }
    Ok(())
}

fn report(model_config: &ModelConfig, model: &LinearChargeModel, path: &Path) {
    println!();
    println!(
        "{} ({}) saved to {}",
        model_config.version(),
        model_config.model_type(),
        path.display()
    );
    println!("  {:<18} {:>12.4}", "intercept", model.intercept());
    for (name, coefficient) in model
        .features()
        .column_names()
        .iter()
        .zip(model.coefficients())
    {
        println!("  {:<18} {:>12.4}", name, coefficient);
    }
}
