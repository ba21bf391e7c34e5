//! CLI command definitions.

use chargewatch::{
    AGE_RANGE, BMI_RANGE, CHILDREN_RANGE, ChargewatchResult, FeedbackScore, InsuranceInput,
    ModelFilter, Region, Sex, Smoker, ValidationError,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

/// chargewatch - insurance charge prediction with live feedback monitoring
#[derive(Parser, Debug)]
#[command(name = "chargewatch")]
#[command(about = "Insurance charge prediction with feedback logging and monitoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file replacing ./chargewatch.toml and the home config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Event log path, overriding the configured one
    #[arg(long, global = true)]
    pub log_path: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict charges with both models without logging anything
    Predict {
        /// Input record
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Predict charges and log both predictions with your feedback
    Record {
        /// Input record
        #[command(flatten)]
        input: InputArgs,

        /// How useful were these predictions? (1 = Poor, 5 = Excellent)
        #[arg(long, default_value_t = FeedbackScore::DEFAULT.value(), value_parser = parse_score, conflicts_with = "no_score")]
        score: u8,

        /// Log the predictions without a score
        #[arg(long)]
        no_score: bool,

        /// Optional comment
        #[arg(long)]
        comment: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Key metrics and the per-version comparison
    Summary {
        /// Model version to report on, or "all"
        #[arg(long, default_value = "all")]
        model: ModelFilter,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Most recent feedback comments, newest first
    Comments {
        /// Maximum number of comments (defaults to recent_comment_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Raw monitoring log rows, oldest first
    Logs {
        /// Model version to show, or "all"
        #[arg(long, default_value = "all")]
        model: ModelFilter,

        /// Only the last N rows
        #[arg(long)]
        tail: Option<usize>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Launch the monitoring dashboard
    Dashboard,

    /// Fit both models on an insurance CSV and write their artifacts
    Train {
        /// CSV with age,sex,bmi,children,smoker,region,charges columns
        #[arg(long, default_value = "insurance.csv")]
        data: PathBuf,

        /// Baseline artifact path (defaults to the configured one)
        #[arg(long)]
        baseline_out: Option<PathBuf>,

        /// Improved artifact path (defaults to the configured one)
        #[arg(long)]
        improved_out: Option<PathBuf>,
    },
}

/// The six prediction inputs.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Age in years (18-64)
    #[arg(long, default_value_t = 30, value_parser = parse_age)]
    pub age: u8,

    /// Sex (male or female)
    #[arg(long, default_value = "male")]
    pub sex: Sex,

    /// Body mass index (15.0-55.0)
    #[arg(long, default_value_t = 27.5, value_parser = parse_bmi)]
    pub bmi: f64,

    /// Number of children (0-5)
    #[arg(long, default_value_t = 0, value_parser = parse_children)]
    pub children: u8,

    /// Smoker (yes or no)
    #[arg(long, default_value = "yes")]
    pub smoker: Smoker,

    /// Region (northeast, northwest, southeast or southwest)
    #[arg(long, default_value = "northeast")]
    pub region: Region,
}

impl InputArgs {
    /// Build the validated input record.
    pub fn to_input(&self) -> ChargewatchResult<InsuranceInput> {
        InsuranceInput::builder()
            .age(self.age)
            .sex(self.sex)
            .bmi(self.bmi)
            .children(self.children)
            .smoker(self.smoker)
            .region(self.region)
            .build()
            .map_err(|e| ValidationError::from(e.to_string()).into())
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

fn parse_bounded<T>(s: &str, range: RangeInclusive<T>) -> Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    let value: T = s.trim().parse().map_err(|e| format!("{}", e))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{} is not in {}..={}",
            value,
            range.start(),
            range.end()
        ))
    }
}

fn parse_age(s: &str) -> Result<u8, String> {
    parse_bounded(s, AGE_RANGE)
}

fn parse_bmi(s: &str) -> Result<f64, String> {
    parse_bounded(s, BMI_RANGE)
}

fn parse_children(s: &str) -> Result<u8, String> {
    parse_bounded(s, CHILDREN_RANGE)
}

fn parse_score(s: &str) -> Result<u8, String> {
    parse_bounded(s, FeedbackScore::MIN..=FeedbackScore::MAX)
}
