//! Feature encoding: how an input record becomes a row of numbers.

use chargewatch_core::InsuranceInput;
use serde::{Deserialize, Serialize};

/// One of the six input columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
    /// Age in years
    #[display("age")]
    Age,
    /// Sex label
    #[display("sex")]
    Sex,
    /// Body mass index
    #[display("bmi")]
    Bmi,
    /// Number of children
    #[display("children")]
    Children,
    /// Smoker label
    #[display("smoker")]
    Smoker,
    /// Region label
    #[display("region")]
    Region,
}

impl InputField {
    /// Numeric value of the field, `None` for categorical fields.
    pub fn numeric(self, input: &InsuranceInput) -> Option<f64> {
        match self {
            InputField::Age => Some(f64::from(*input.age())),
            InputField::Bmi => Some(*input.bmi()),
            InputField::Children => Some(f64::from(*input.children())),
            InputField::Sex | InputField::Smoker | InputField::Region => None,
        }
    }

    /// Label of the field as written in data files.
    pub fn label(self, input: &InsuranceInput) -> String {
        match self {
            InputField::Age => input.age().to_string(),
            InputField::Sex => input.sex().to_string(),
            InputField::Bmi => input.bmi().to_string(),
            InputField::Children => input.children().to_string(),
            InputField::Smoker => input.smoker().to_string(),
            InputField::Region => input.region().to_string(),
        }
    }

    /// Whether the field is categorical.
    pub fn is_categorical(self) -> bool {
        matches!(self, InputField::Sex | InputField::Smoker | InputField::Region)
    }
}

/// One encoded block of the design row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Numeric passthrough, one column
    Numeric(InputField),
    /// One indicator column per listed category.
    ///
    /// Labels not listed (including a reference level deliberately left out)
    /// encode as all zeros.
    OneHot {
        /// Categorical field being encoded
        field: InputField,
        /// Categories with their own column, in column order
        categories: Vec<String>,
    },
}

impl Feature {
    /// Number of design columns this feature produces.
    pub fn width(&self) -> usize {
        match self {
            Feature::Numeric(_) => 1,
            Feature::OneHot { categories, .. } => categories.len(),
        }
    }

    /// Column names, e.g. `bmi` or `region=southeast`.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            Feature::Numeric(field) => vec![field.to_string()],
            Feature::OneHot { field, categories } => categories
                .iter()
                .map(|category| format!("{}={}", field, category))
                .collect(),
        }
    }

    fn encode_into(&self, input: &InsuranceInput, row: &mut Vec<f64>) {
        match self {
            Feature::Numeric(field) => row.push(field.numeric(input).unwrap_or(0.0)),
            Feature::OneHot { field, categories } => {
                let label = field.label(input);
                row.extend(
                    categories
                        .iter()
                        .map(|category| if *category == label { 1.0 } else { 0.0 }),
                );
            }
        }
    }
}

/// Ordered list of features making up a model's design row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(Vec<Feature>);

impl FeatureSet {
    /// Build from explicit features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self(features)
    }

    /// Age, bmi and children.
    pub fn baseline() -> Self {
        Self(vec![
            Feature::Numeric(InputField::Age),
            Feature::Numeric(InputField::Bmi),
            Feature::Numeric(InputField::Children),
        ])
    }

    /// All six inputs: indicators for smoker, region and sex, then the
    /// numeric fields.
    ///
    /// The first level of each category (`no`, `northeast`, `female`) is the
    /// reference level folded into the intercept.
    pub fn improved() -> Self {
        let one_hot = |field, categories: &[&str]| Feature::OneHot {
            field,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        };
        Self(vec![
            one_hot(InputField::Smoker, &["yes"]),
            one_hot(InputField::Region, &["northwest", "southeast", "southwest"]),
            one_hot(InputField::Sex, &["male"]),
            Feature::Numeric(InputField::Age),
            Feature::Numeric(InputField::Bmi),
            Feature::Numeric(InputField::Children),
        ])
    }

    /// The features, in column order.
    pub fn features(&self) -> &[Feature] {
        &self.0
    }

    /// Total number of design columns.
    pub fn width(&self) -> usize {
        self.0.iter().map(Feature::width).sum()
    }

    /// Names of every design column.
    pub fn column_names(&self) -> Vec<String> {
        self.0.iter().flat_map(Feature::column_names).collect()
    }

    /// Encode one input as a design row of length [`width`](Self::width).
    pub fn encode(&self, input: &InsuranceInput) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        for feature in &self.0 {
            feature.encode_into(input, &mut row);
        }
        row
    }

    /// Describe the first misconfigured feature, if any.
    pub(crate) fn misconfiguration(&self) -> Option<String> {
        self.0.iter().find_map(|feature| match feature {
            Feature::Numeric(field) if field.is_categorical() => {
                Some(format!("{} is categorical and cannot be numeric", field))
            }
            Feature::OneHot { field, .. } if !field.is_categorical() => {
                Some(format!("{} is numeric and cannot be one-hot encoded", field))
            }
            _ => None,
        })
    }
}
