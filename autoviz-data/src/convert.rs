use std::borrow::Cow;

use chrono::NaiveDate;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::types::{DateUnit, FieldRole};
use crate::value::Value;

const YEAR_MIN: f64 = 1800.0;
const YEAR_MAX: f64 = 2100.0;
const INTEGER_TOLERANCE: f64 = 1e-6;

/// Controls how many values are inspected when guessing a field's type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum number of non-null values to inspect
    pub sample_size: usize,
    /// A conversion happens when strictly more than this fraction of the sample parses
    pub convert_fraction: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: 50,
            convert_fraction: 0.5,
        }
    }
}

/// Converts ambiguously typed fields into numeric, date or categorical fields by sampling.
///
/// The random generator is injected so inference is reproducible. Fields that are already
/// numeric never consume randomness.
#[derive(Debug, Clone)]
pub struct FieldConverter<R = StdRng> {
    rng: R,
    config: SamplingConfig,
}

impl FieldConverter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SamplingConfig::default())
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SamplingConfig::default())
    }
}

impl<R: Rng> FieldConverter<R> {
    pub fn new(rng: R, config: SamplingConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Return the best representation of `base`. The input field is never modified.
    pub fn convert(&mut self, base: &Field) -> Field {
        if base.is_synthetic() || base.is_date() {
            return base.clone();
        }

        let mut order = None;
        let as_numeric = if base.is_numeric() {
            Some(Cow::Borrowed(base))
        } else {
            let order = order.get_or_insert_with(|| self.random_order(base.row_count()));
            let (sampled, numeric) = self.count_matching(base, order, |v| {
                !v.is_date() && v.as_number().is_some()
            });
            if self.exceeds_threshold(numeric, sampled) {
                debug!(
                    "Field `{}`: {numeric} of {sampled} sampled values are numeric",
                    base.name()
                );
                Some(Cow::Owned(to_numeric(base)))
            } else {
                None
            }
        };

        if let Some(numeric) = as_numeric {
            if is_yearly(&numeric) {
                debug!("Field `{}` holds years, converting to dates", base.name());
                return to_years(&numeric);
            }
            return numeric.into_owned();
        }

        let order = order.get_or_insert_with(|| self.random_order(base.row_count()));
        let (sampled, dates) = self.count_matching(base, order, |v| v.as_date().is_some());
        if self.exceeds_threshold(dates, sampled) {
            debug!(
                "Field `{}`: {dates} of {sampled} sampled values are dates",
                base.name()
            );
            to_dates(base)
        } else {
            base.clone()
        }
    }

    fn random_order(&mut self, row_count: usize) -> Vec<usize> {
        let mut order = (0..row_count).collect::<Vec<_>>();
        order.shuffle(&mut self.rng);
        order
    }

    /// Scan non-null values in `order`, returning (values inspected, values matching)
    fn count_matching(
        &self,
        field: &Field,
        order: &[usize],
        matches: impl Fn(&Value) -> bool,
    ) -> (usize, usize) {
        let limit = field.valid().min(self.config.sample_size);
        order
            .iter()
            .filter_map(|&row| field.value(row))
            .take(limit)
            .fold((0, 0), |(seen, hits), v| {
                (seen + 1, if matches(v) { hits + 1 } else { hits })
            })
    }

    fn exceeds_threshold(&self, hits: usize, sampled: usize) -> bool {
        hits as f64 > self.config.convert_fraction * sampled as f64
    }
}

fn is_yearly(field: &Field) -> bool {
    let (Some(min), Some(max)) = (field.min(), field.max()) else {
        return false;
    };
    if min < YEAR_MIN || max > YEAR_MAX {
        return false;
    }
    field
        .stats()
        .granularity
        .is_some_and(|g| (g - g.round()).abs() < INTEGER_TOLERANCE)
}

fn to_numeric(base: &Field) -> Field {
    let values = base
        .values()
        .iter()
        .map(|v| v.as_ref().and_then(Value::as_number).map(Value::Number))
        .collect();
    Field::new(base.name(), FieldRole::Numeric, values)
}

fn to_dates(base: &Field) -> Field {
    let values = base
        .values()
        .iter()
        .map(|v| v.as_ref().and_then(Value::as_date).map(Value::Date))
        .collect();
    Field::new(base.name(), FieldRole::Date, values)
}

fn to_years(numeric: &Field) -> Field {
    let values = numeric
        .values()
        .iter()
        .map(|v| {
            v.as_ref()
                .and_then(Value::as_number)
                .and_then(|year| NaiveDate::from_ymd_opt(year.round() as i32, 1, 1))
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(Value::Date)
        })
        .collect();
    Field::new(numeric.name(), FieldRole::Date, values).with_date_unit(DateUnit::Year)
}
