//! Core data types for chargewatch.
//!
//! This crate provides the types shared by the prediction surface, the event
//! log and the monitoring views: the six-field [`InsuranceInput`], the
//! [`PredictionEvent`] row, and the small value types around them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event;
mod feedback;
mod identity;
mod input;
mod money;
mod timestamp;

pub use event::{EVENT_COLUMNS, PredictionEvent};
pub use feedback::FeedbackScore;
pub use identity::ModelIdentity;
pub use input::{
    AGE_RANGE, BMI_RANGE, CHILDREN_RANGE, InsuranceInput, InsuranceInputBuilder, Region, Sex,
    Smoker,
};
pub use money::format_dollars;
pub use timestamp::{format_timestamp, parse_timestamp};
