//! The six-field insurance input record.

use chargewatch_error::{ValidationError, ValidationErrorKind};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted ages in years.
pub const AGE_RANGE: RangeInclusive<u8> = 18..=64;
/// Accepted body mass index values.
pub const BMI_RANGE: RangeInclusive<f64> = 15.0..=55.0;
/// Accepted number of dependent children.
pub const CHILDREN_RANGE: RangeInclusive<u8> = 0..=5;

/// Biological sex of the primary beneficiary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sex {
    /// Male
    #[display("male")]
    Male,
    /// Female
    #[display("female")]
    Female,
}

/// Smoking status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Smoker {
    /// Smoker
    #[display("yes")]
    Yes,
    /// Non-smoker
    #[display("no")]
    No,
}

/// Residential region in the US.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    /// Northeast
    #[display("northeast")]
    Northeast,
    /// Northwest
    #[display("northwest")]
    Northwest,
    /// Southeast
    #[display("southeast")]
    Southeast,
    /// Southwest
    #[display("southwest")]
    Southwest,
}

/// One prediction request: the fixed-shape record both predictors consume.
///
/// # Examples
///
/// ```
/// use chargewatch_core::{InsuranceInput, Region, Smoker};
///
/// let input = InsuranceInput::builder()
///     .age(45)
///     .smoker(Smoker::No)
///     .region(Region::Southwest)
///     .build()
///     .unwrap();
///
/// assert_eq!(*input.age(), 45);
/// assert_eq!(
///     input.summary(),
///     "age=45, sex=male, bmi=27.5, children=0, smoker=no, region=southwest"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(build_fn(validate = "Self::check_ranges"))]
pub struct InsuranceInput {
    /// Age in years.
    #[builder(default = "30")]
    age: u8,
    /// Sex of the beneficiary.
    #[builder(default = "Sex::Male")]
    sex: Sex,
    /// Body mass index.
    #[builder(default = "27.5")]
    bmi: f64,
    /// Number of dependent children.
    #[builder(default = "0")]
    children: u8,
    /// Smoking status.
    #[builder(default = "Smoker::Yes")]
    smoker: Smoker,
    /// Residential region.
    #[builder(default = "Region::Northeast")]
    region: Region,
}

impl Default for InsuranceInput {
    fn default() -> Self {
        Self {
            age: 30,
            sex: Sex::Male,
            bmi: 27.5,
            children: 0,
            smoker: Smoker::Yes,
            region: Region::Northeast,
        }
    }
}

impl InsuranceInput {
    /// Creates a new input builder seeded with the form defaults.
    pub fn builder() -> InsuranceInputBuilder {
        InsuranceInputBuilder::default()
    }

    /// Checks every numeric field against its accepted range.
    ///
    /// Inputs built through [`InsuranceInputBuilder`] are already checked;
    /// this is for values obtained by deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match range_violation(self.age, self.bmi, self.children) {
            Some(kind) => Err(ValidationError::new(kind)),
            None => Ok(()),
        }
    }

    /// Human-readable rendering stored in the `input_summary` log column.
    ///
    /// `bmi` is written in full (shortest round-trip form, `30.0` for whole
    /// numbers) so the summary always shows the value the models saw.
    pub fn summary(&self) -> String {
        format!(
            "age={}, sex={}, bmi={:?}, children={}, smoker={}, region={}",
            self.age, self.sex, self.bmi, self.children, self.smoker, self.region
        )
    }
}

impl InsuranceInputBuilder {
    fn check_ranges(&self) -> Result<(), String> {
        let age = self.age.unwrap_or(30);
        let bmi = self.bmi.unwrap_or(27.5);
        let children = self.children.unwrap_or(0);
        match range_violation(age, bmi, children) {
            Some(kind) => Err(kind.to_string()),
            None => Ok(()),
        }
    }
}

fn range_violation(age: u8, bmi: f64, children: u8) -> Option<ValidationErrorKind> {
    if !AGE_RANGE.contains(&age) {
        return Some(out_of_range("age", AGE_RANGE.start(), AGE_RANGE.end(), age));
    }
    if !BMI_RANGE.contains(&bmi) {
        return Some(out_of_range("bmi", BMI_RANGE.start(), BMI_RANGE.end(), bmi));
    }
    if !CHILDREN_RANGE.contains(&children) {
        return Some(out_of_range(
            "children",
            CHILDREN_RANGE.start(),
            CHILDREN_RANGE.end(),
            children,
        ));
    }
    None
}

fn out_of_range(
    field: &str,
    min: impl ToString,
    max: impl ToString,
    value: impl ToString,
) -> ValidationErrorKind {
    ValidationErrorKind::OutOfRange {
        field: field.to_string(),
        min: min.to_string(),
        max: max.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn builder_uses_form_defaults() {
        let input = InsuranceInput::builder().build().unwrap();
        assert_eq!(input, InsuranceInput::default());
    }

    #[test]
    fn builder_rejects_out_of_range_age() {
        let err = InsuranceInput::builder().age(70).build().unwrap_err();
        assert!(err.to_string().contains("age must be between 18 and 64"));
    }

    #[test]
    fn validate_rejects_bmi_outside_range() {
        let input: InsuranceInput = serde_json::from_str(
            r#"{"age":30,"sex":"female","bmi":60.0,"children":1,"smoker":"no","region":"northwest"}"#,
        )
        .unwrap();
        let err = input.validate().unwrap_err();
        assert!(matches!(
            err.kind(),
            ValidationErrorKind::OutOfRange { field, .. } if field == "bmi"
        ));
    }

    #[test]
    fn categorical_labels_parse_case_insensitively() {
        assert_eq!(Region::from_str("SouthEast").unwrap(), Region::Southeast);
        assert_eq!(Smoker::from_str("no").unwrap(), Smoker::No);
        assert_eq!(Sex::from_str("Female").unwrap(), Sex::Female);
        assert!(Region::from_str("midwest").is_err());
    }

    #[test]
    fn summary_matches_log_rendering() {
        let input = InsuranceInput::builder()
            .age(52)
            .sex(Sex::Female)
            .bmi(31.4)
            .children(3)
            .smoker(Smoker::No)
            .region(Region::Southeast)
            .build()
            .unwrap();
        assert_eq!(
            input.summary(),
            "age=52, sex=female, bmi=31.4, children=3, smoker=no, region=southeast"
        );
    }

    #[test]
    fn summary_keeps_full_bmi_precision() {
        let input = InsuranceInput::builder().bmi(27.55).build().unwrap();
        assert!(input.summary().contains("bmi=27.55,"), "{}", input.summary());

        let whole = InsuranceInput::builder().bmi(30.0).build().unwrap();
        assert!(whole.summary().contains("bmi=30.0,"), "{}", whole.summary());
    }
}
