//! Ordinary least squares training from the insurance CSV.

use crate::{FeatureSet, LinearChargeModel};
use chargewatch_core::{InsuranceInput, Region, Sex, Smoker};
use chargewatch_error::{ChargewatchResult, ModelError, ModelErrorKind};
use serde::Deserialize;
use std::path::Path;

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-9;

/// One labelled training example.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRecord {
    /// Predictor inputs
    pub input: InsuranceInput,
    /// Observed yearly charges
    pub charges: f64,
}

#[derive(Debug, Deserialize)]
struct TrainingRow {
    age: u8,
    sex: Sex,
    bmi: f64,
    children: u8,
    smoker: Smoker,
    region: Region,
    charges: f64,
}

fn training_error(message: String) -> ModelError {
    ModelError::new(ModelErrorKind::TrainingData(message))
}

/// Read `age,sex,bmi,children,smoker,region,charges` rows.
///
/// Column order is taken from the header, extra columns are ignored.
#[tracing::instrument(fields(path = %path.as_ref().display()), skip(path))]
pub fn load_training_data(path: impl AsRef<Path>) -> ChargewatchResult<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| training_error(format!("{}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<TrainingRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = row.map_err(|e| training_error(format!("line {}: {}", line, e)))?;
        let input = InsuranceInput::builder()
            .age(row.age)
            .sex(row.sex)
            .bmi(row.bmi)
            .children(row.children)
            .smoker(row.smoker)
            .region(row.region)
            .build()
            .map_err(|e| training_error(format!("line {}: {}", line, e)))?;
        records.push(TrainingRecord {
            input,
            charges: row.charges,
        });
    }

    tracing::info!(rows = records.len(), "Loaded training data");
    Ok(records)
}

/// Fit `charges ~ intercept + features` by ordinary least squares.
///
/// Solves the normal equations `XᵀX β = Xᵀy`, where `X` carries a leading
/// column of ones for the intercept.
#[tracing::instrument(skip(features, records), fields(rows = records.len(), columns = features.width()))]
pub fn fit(features: FeatureSet, records: &[TrainingRecord]) -> ChargewatchResult<LinearChargeModel> {
    let columns = features.width() + 1;
    if records.len() < columns {
        return Err(training_error(format!(
            "need at least {} rows to fit {} parameters, found {}",
            columns,
            columns,
            records.len()
        ))
        .into());
    }

    let mut xtx = vec![vec![0.0; columns]; columns];
    let mut xty = vec![0.0; columns];
    let mut row = Vec::with_capacity(columns);
    for record in records {
        row.clear();
        row.push(1.0);
        row.extend(features.encode(&record.input));
        for i in 0..columns {
            xty[i] += row[i] * record.charges;
            for j in i..columns {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..columns {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let beta = solve(xtx, xty).map_err(|column| {
        let names = features.column_names();
        let name = match column {
            0 => "intercept".to_string(),
            c => names.get(c - 1).cloned().unwrap_or_default(),
        };
        ModelError::new(ModelErrorKind::SingularMatrix(format!(
            "column {} is a linear combination of the others",
            name
        )))
    })?;

    tracing::info!(intercept = beta[0], "Fitted linear model");
    LinearChargeModel::new(features, beta[1..].to_vec(), beta[0])
}

/// Gaussian elimination with partial pivoting.
///
/// Returns the index of the first column without a usable pivot when the
/// system is singular.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, usize> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            .unwrap_or(col);
        let scale = a.iter().map(|r| r[col].abs()).fold(1.0, f64::max);
        if a[pivot][col].abs() <= PIVOT_EPSILON * scale {
            return Err(col);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for r in col + 1..n {
            let factor = a[r][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[r][c] -= factor * a[col][c];
            }
            b[r] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for r in (0..n).rev() {
        let tail: f64 = (r + 1..n).map(|c| a[r][c] * x[c]).sum();
        x[r] = (b[r] - tail) / a[r][r];
    }
    Ok(x)
}
