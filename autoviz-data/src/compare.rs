use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::dataset::Dataset;
use crate::error::DataError;
use crate::field::Field;
use crate::types::FieldRole;
use crate::value::Value;

/// Orders rows of a dataset by an ordered list of fields.
///
/// Each field compares with its natural ordering: numbers ascending, dates chronologically,
/// categories by their index in the field's category set. Nulls sort first. When the
/// comparator is descending only the final result is negated.
#[derive(Debug, Clone)]
pub struct RowComparator<'a> {
    columns: Vec<ColumnOrder<'a>>,
    descending: bool,
}

#[derive(Debug, Clone)]
struct ColumnOrder<'a> {
    field: &'a Field,
    category_index: HashMap<&'a str, usize>,
}

impl<'a> ColumnOrder<'a> {
    fn new(field: &'a Field) -> Self {
        let category_index = if field.role() == FieldRole::Categorical {
            field
                .stats()
                .categories
                .iter()
                .enumerate()
                .map(|(i, c)| (c.as_str(), i))
                .collect()
        } else {
            HashMap::new()
        };
        Self {
            field,
            category_index,
        }
    }

    fn compare(&self, a: usize, b: usize) -> Ordering {
        match (self.field.value(a), self.field.value(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(va), Some(vb)) => self.compare_values(va, vb),
        }
    }

    fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => OrderedFloat(*x).cmp(&OrderedFloat(*y)),
            (Value::Date(x), Value::Date(y)) => x.cmp(y),
            (
                Value::Range {
                    low: l1,
                    high: h1,
                },
                Value::Range {
                    low: l2,
                    high: h2,
                },
            ) => (OrderedFloat(*l1), OrderedFloat(*h1)).cmp(&(OrderedFloat(*l2), OrderedFloat(*h2))),
            (Value::Text(x), Value::Text(y)) => {
                match (
                    self.category_index.get(x.as_str()),
                    self.category_index.get(y.as_str()),
                ) {
                    (Some(i), Some(j)) => i.cmp(j),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => x.cmp(y),
                }
            }
            _ => kind_rank(a).cmp(&kind_rank(b)),
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Date(_) => 1,
        Value::Range { .. } => 2,
        Value::Text(_) => 3,
    }
}

impl<'a> RowComparator<'a> {
    /// Build a comparator over the named fields of a dataset
    pub fn new<S: AsRef<str>>(
        dataset: &'a Dataset,
        fields: &[S],
        descending: bool,
    ) -> Result<Self, DataError> {
        let fields = fields
            .iter()
            .map(|name| dataset.field(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_fields(fields, descending))
    }

    pub fn from_fields(fields: impl IntoIterator<Item = &'a Field>, descending: bool) -> Self {
        Self {
            columns: fields.into_iter().map(ColumnOrder::new).collect(),
            descending,
        }
    }

    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        let result = self
            .columns
            .iter()
            .map(|column| column.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal);
        if self.descending {
            result.reverse()
        } else {
            result
        }
    }

    /// Stable permutation of `0..row_count` sorted by this comparator
    pub fn make_sorted_order(&self, row_count: usize) -> Vec<usize> {
        let mut order = (0..row_count).collect::<Vec<_>>();
        order.sort_by(|a, b| self.compare(*a, *b));
        order
    }

    /// True when no two rows compare equal
    pub fn is_injective(&self, row_count: usize) -> bool {
        self.make_sorted_order(row_count)
            .iter()
            .tuple_windows()
            .all(|(a, b)| self.compare(*a, *b).is_ne())
    }
}
