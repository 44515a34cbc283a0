use std::sync::OnceLock;

use chrono::NaiveDateTime;

use crate::stats::FieldStats;
use crate::types::{DateUnit, FieldRole, TransformKind};
use crate::value::Value;

/// Name of the synthetic per-row index field
pub const ROW_FIELD: &str = "#row";

/// Name of the synthetic constant count field
pub const COUNT_FIELD: &str = "#count";

/// One typed column of a dataset together with its summary statistics.
///
/// Statistics are computed when the field is built and are read-only afterwards. The
/// transform tag is the only lazily populated property; it is written at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    role: FieldRole,
    values: Vec<Option<Value>>,
    stats: FieldStats,
    date_unit: Option<DateUnit>,
    transform: OnceLock<TransformKind>,
}

impl Field {
    pub fn new(name: impl Into<String>, role: FieldRole, values: Vec<Option<Value>>) -> Self {
        let stats = FieldStats::compute(role, &values);
        let date_unit =
            (role == FieldRole::Date).then(|| DateUnit::from_granularity(stats.granularity));
        Self {
            name: name.into(),
            role,
            values,
            stats,
            date_unit,
            transform: OnceLock::new(),
        }
    }

    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = values.into_iter().map(|v| v.map(Value::Number)).collect();
        Self::new(name, FieldRole::Numeric, values)
    }

    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| v.map(|s| Value::Text(s.into())))
            .collect();
        Self::new(name, FieldRole::Categorical, values)
    }

    pub fn dates<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<NaiveDateTime>>,
    {
        let values = values.into_iter().map(|v| v.map(Value::Date)).collect();
        Self::new(name, FieldRole::Date, values)
    }

    /// Synthetic 1-based row index
    pub fn row_index(row_count: usize) -> Self {
        let values = (1..=row_count)
            .map(|i| Some(Value::Number(i as f64)))
            .collect();
        Self::new(ROW_FIELD, FieldRole::Synthetic, values)
    }

    /// Synthetic field holding the same value on every row
    pub fn constant(name: impl Into<String>, value: Value, row_count: usize) -> Self {
        Self::new(name, FieldRole::Synthetic, vec![Some(value); row_count])
    }

    /// Replace the computed statistics with externally supplied ones
    pub fn with_stats(mut self, stats: FieldStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_date_unit(mut self, unit: DateUnit) -> Self {
        self.date_unit = Some(unit);
        self
    }

    /// Same field metadata over a new row order. The memoized transform carries over.
    /// Every index in `order` must be a valid row.
    pub(crate) fn reordered(&self, order: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            role: self.role,
            values: order.iter().map(|&i| self.values[i].clone()).collect(),
            stats: self.stats.clone(),
            date_unit: self.date_unit,
            transform: self.transform.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn value(&self, row: usize) -> Option<&Value> {
        self.values.get(row).and_then(Option::as_ref)
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn stats(&self) -> &FieldStats {
        &self.stats
    }

    pub fn valid(&self) -> usize {
        self.stats.valid
    }

    pub fn min(&self) -> Option<f64> {
        self.stats.min
    }

    pub fn max(&self) -> Option<f64> {
        self.stats.max
    }

    pub fn date_unit(&self) -> Option<DateUnit> {
        self.date_unit
    }

    pub fn is_numeric(&self) -> bool {
        self.role == FieldRole::Numeric
    }

    pub fn is_date(&self) -> bool {
        self.role == FieldRole::Date
    }

    pub fn is_synthetic(&self) -> bool {
        self.role == FieldRole::Synthetic || self.name.starts_with('#')
    }

    /// The memoized transform, if it has been computed
    pub fn transform(&self) -> Option<TransformKind> {
        self.transform.get().copied()
    }

    /// Return the memoized transform, computing it with `init` on first access
    pub fn transform_or_init(&self, init: impl FnOnce(&Field) -> TransformKind) -> TransformKind {
        *self.transform.get_or_init(|| init(self))
    }
}
