use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

/// Semantic role of a field
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldRole {
    Numeric,
    #[default]
    Categorical,
    Date,
    Range,
    Synthetic,
}

/// Axis transform chosen for a field, memoized on the field once computed
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransformKind {
    #[default]
    Linear,
    Log,
    Root,
    Date,
}

/// Calendar granularity of a date field
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateUnit {
    /// Approximate length of one unit in days
    pub fn approx_days(&self) -> f64 {
        match self {
            DateUnit::Second => 1.0 / 86_400.0,
            DateUnit::Minute => 1.0 / 1_440.0,
            DateUnit::Hour => 1.0 / 24.0,
            DateUnit::Day => 1.0,
            DateUnit::Week => 7.0,
            DateUnit::Month => 30.4375,
            DateUnit::Quarter => 91.3125,
            DateUnit::Year => 365.25,
        }
    }

    /// Coarsest unit whose length does not exceed the smallest gap between values (in days).
    /// A field with fewer than two distinct values is treated as daily.
    pub fn from_granularity(granularity: Option<f64>) -> Self {
        let Some(days) = granularity.filter(|g| *g > 0.0) else {
            return DateUnit::Day;
        };
        if days >= 360.0 {
            DateUnit::Year
        } else if days >= 88.0 {
            DateUnit::Quarter
        } else if days >= 28.0 {
            DateUnit::Month
        } else if days >= 7.0 {
            DateUnit::Week
        } else if days >= 1.0 - 1e-9 {
            DateUnit::Day
        } else if days >= 1.0 / 24.0 - 1e-9 {
            DateUnit::Hour
        } else if days >= 1.0 / 1_440.0 - 1e-9 {
            DateUnit::Minute
        } else {
            DateUnit::Second
        }
    }
}
