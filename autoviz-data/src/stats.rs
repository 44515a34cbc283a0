use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::types::FieldRole;
use crate::value::{days_since_epoch, Value};

/// Summary statistics for a field.
///
/// Computed once when a field is built. Numeric and synthetic fields get the full set of
/// moments, date fields the same set measured in days, range fields only their extent and
/// categorical fields their sorted category set. Skew is only defined for numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub valid: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub skew: Option<f64>,
    pub granularity: Option<f64>,
    pub categories: Vec<String>,
}

impl FieldStats {
    pub fn compute(role: FieldRole, values: &[Option<Value>]) -> Self {
        let valid = values.iter().flatten().count();
        match role {
            FieldRole::Numeric | FieldRole::Synthetic => {
                let numbers = values
                    .iter()
                    .flatten()
                    .filter_map(Value::as_number)
                    .collect::<Vec<_>>();
                let mut stats = Self::from_numbers(valid, numbers);
                if role == FieldRole::Synthetic {
                    stats.skew = None;
                }
                stats
            }
            FieldRole::Date => {
                let days = values
                    .iter()
                    .flatten()
                    .filter_map(|v| v.as_date())
                    .map(|d| days_since_epoch(&d))
                    .collect::<Vec<_>>();
                let mut stats = Self::from_numbers(valid, days);
                stats.skew = None;
                stats
            }
            FieldRole::Range => {
                let bounds = values.iter().flatten().filter_map(|v| match v {
                    Value::Range { low, high } => Some((*low, *high)),
                    _ => None,
                });
                let (min, max) = bounds.fold((None, None), |(min, max), (low, high)| {
                    (
                        Some(min.map_or(low, |m: f64| m.min(low))),
                        Some(max.map_or(high, |m: f64| m.max(high))),
                    )
                });
                Self {
                    valid,
                    min,
                    max,
                    ..Default::default()
                }
            }
            FieldRole::Categorical => Self {
                valid,
                categories: values
                    .iter()
                    .flatten()
                    .map(|v| v.to_string())
                    .sorted()
                    .dedup()
                    .collect(),
                ..Default::default()
            },
        }
    }

    /// Statistics for a list of finite numbers
    pub fn from_numbers(valid: usize, mut numbers: Vec<f64>) -> Self {
        numbers.retain(|v| v.is_finite());
        if numbers.is_empty() {
            return Self {
                valid,
                ..Default::default()
            };
        }
        numbers.sort_by_key(|v| OrderedFloat(*v));

        let n = numbers.len() as f64;
        let mean = numbers.iter().sum::<f64>() / n;
        let m2 = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let m3 = numbers.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
        let stddev = if numbers.len() > 1 {
            (m2 * n / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let skew = if m2 > 0.0 { m3 / m2.powf(1.5) } else { 0.0 };

        let granularity = numbers
            .iter()
            .tuple_windows()
            .map(|(a, b)| b - a)
            .filter(|d| *d > 0.0)
            .min_by_key(|d| OrderedFloat(*d));

        Self {
            valid,
            min: numbers.first().copied(),
            max: numbers.last().copied(),
            mean: Some(mean),
            stddev: Some(stddev),
            q1: Some(quantile(&numbers, 0.25)),
            q3: Some(quantile(&numbers, 0.75)),
            skew: Some(skew),
            granularity,
            categories: Vec::new(),
        }
    }
}

/// Linearly interpolated quantile of sorted, non-empty data
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn numbers(values: &[f64]) -> Vec<Option<Value>> {
        values.iter().map(|v| Some(Value::Number(*v))).collect()
    }

    #[test]
    fn test_numeric_stats() {
        let mut values = numbers(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        values.push(None);
        let stats = FieldStats::compute(FieldRole::Numeric, &values);

        assert_eq!(stats.valid, 5);
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(5.0));
        assert_approx_eq!(f64, stats.mean.unwrap(), 3.0);
        assert_approx_eq!(f64, stats.stddev.unwrap(), 2.5f64.sqrt());
        assert_approx_eq!(f64, stats.q1.unwrap(), 2.0);
        assert_approx_eq!(f64, stats.q3.unwrap(), 4.0);
        assert_approx_eq!(f64, stats.skew.unwrap(), 0.0);
        assert_approx_eq!(f64, stats.granularity.unwrap(), 1.0);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn test_right_skewed_data() {
        let stats = FieldStats::compute(
            FieldRole::Numeric,
            &numbers(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 50.0]),
        );
        assert!(stats.skew.unwrap() > 1.0);
        assert_approx_eq!(f64, stats.granularity.unwrap(), 1.0);
    }

    #[test]
    fn test_constant_field() {
        let stats = FieldStats::compute(FieldRole::Numeric, &numbers(&[7.0, 7.0, 7.0]));
        assert_eq!(stats.stddev, Some(0.0));
        assert_eq!(stats.skew, Some(0.0));
        assert_eq!(stats.granularity, None);
        assert_eq!(stats.q1, stats.q3);
    }

    #[test]
    fn test_categorical_stats() {
        let values = vec![
            Some(Value::from("b")),
            Some(Value::from("a")),
            None,
            Some(Value::from("b")),
        ];
        let stats = FieldStats::compute(FieldRole::Categorical, &values);
        assert_eq!(stats.valid, 3);
        assert_eq!(stats.categories, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(stats.min, None);
        assert_eq!(stats.skew, None);
    }

    #[test]
    fn test_range_stats() {
        let values = vec![
            Some(Value::Range { low: 0.0, high: 5.0 }),
            Some(Value::Range { low: 5.0, high: 10.0 }),
        ];
        let stats = FieldStats::compute(FieldRole::Range, &values);
        assert_eq!(stats.min, Some(0.0));
        assert_eq!(stats.max, Some(10.0));
    }

    #[test]
    fn test_empty_field() {
        let stats = FieldStats::compute(FieldRole::Numeric, &[None, None]);
        assert_eq!(stats.valid, 0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.skew, None);
    }
}
