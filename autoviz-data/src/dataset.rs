use indexmap::IndexMap;
use rand::Rng;

use crate::compare::RowComparator;
use crate::convert::FieldConverter;
use crate::error::DataError;
use crate::field::{Field, ROW_FIELD};

/// Ordered, name-unique collection of fields sharing one row count
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    fields: IndexMap<String, Field>,
    row_count: usize,
    row_field: Field,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            fields: IndexMap::new(),
            row_count: 0,
            row_field: Field::row_index(0),
        }
    }
}

impl Dataset {
    pub fn try_new(fields: impl IntoIterator<Item = Field>) -> Result<Self, DataError> {
        let mut map = IndexMap::new();
        let mut row_count = None;
        for field in fields {
            let expected = *row_count.get_or_insert(field.row_count());
            if field.row_count() != expected {
                return Err(DataError::RowCountMismatch {
                    field: field.name().to_string(),
                    expected,
                    actual: field.row_count(),
                });
            }
            if map.contains_key(field.name()) {
                return Err(DataError::DuplicateField(field.name().to_string()));
            }
            map.insert(field.name().to_string(), field);
        }
        let row_count = row_count.unwrap_or(0);
        Ok(Self {
            fields: map,
            row_count,
            row_field: Field::row_index(row_count),
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Look up a field by name. The synthetic `#row` field always resolves.
    pub fn field(&self, name: &str) -> Result<&Field, DataError> {
        match self.fields.get(name) {
            Some(field) => Ok(field),
            None if name == ROW_FIELD => Ok(&self.row_field),
            None => Err(DataError::FieldNotFound(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        name == ROW_FIELD || self.fields.contains_key(name)
    }

    /// Add a field, or replace the field with the same name in place
    pub fn with_field(mut self, field: Field) -> Result<Self, DataError> {
        if !self.fields.is_empty() && field.row_count() != self.row_count {
            return Err(DataError::RowCountMismatch {
                field: field.name().to_string(),
                expected: self.row_count,
                actual: field.row_count(),
            });
        }
        if self.fields.is_empty() {
            self.row_count = field.row_count();
            self.row_field = Field::row_index(self.row_count);
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(self)
    }

    /// New dataset whose row `i` is row `order[i]` of this one
    pub fn reorder(&self, order: &[usize]) -> Result<Self, DataError> {
        if let Some(&row) = order.iter().find(|&&row| row >= self.row_count) {
            return Err(DataError::RowOutOfRange {
                row,
                row_count: self.row_count,
            });
        }
        Ok(Self {
            fields: self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.reordered(order)))
                .collect(),
            row_count: order.len(),
            row_field: Field::row_index(order.len()),
        })
    }

    /// Rows sorted by the named fields, ties keeping their original order
    pub fn sort_by<S: AsRef<str>>(&self, fields: &[S], descending: bool) -> Result<Self, DataError> {
        let order = RowComparator::new(self, fields, descending)?.make_sorted_order(self.row_count);
        self.reorder(&order)
    }

    /// Run type inference over every field
    pub fn convert_fields<R: Rng>(&self, converter: &mut FieldConverter<R>) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), converter.convert(field)))
                .collect(),
            row_count: self.row_count,
            row_field: self.row_field.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_try_new_validates_lengths() {
        let err = Dataset::try_new([
            Field::numeric("a", [Some(1.0), Some(2.0)]),
            Field::numeric("b", [Some(1.0)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DataError::RowCountMismatch {
                field: "b".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_try_new_rejects_duplicates() {
        let err = Dataset::try_new([
            Field::numeric("a", [Some(1.0)]),
            Field::numeric("a", [Some(2.0)]),
        ])
        .unwrap_err();
        assert_eq!(err, DataError::DuplicateField("a".to_string()));
    }

    #[test]
    fn test_field_lookup() {
        let data = Dataset::try_new([
            Field::numeric("a", [Some(1.0), Some(2.0)]),
            Field::categorical("b", [Some("x"), Some("y")]),
        ])
        .unwrap();
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(data.field("#row").unwrap().value(1), Some(&Value::Number(2.0)));
        assert!(data.contains("#row"));
        assert!(matches!(data.field("c"), Err(DataError::FieldNotFound(_))));
    }

    #[test]
    fn test_sort_by() {
        let data = Dataset::try_new([
            Field::numeric("a", [Some(3.0), Some(1.0), Some(2.0)]),
            Field::categorical("b", [Some("x"), Some("y"), Some("z")]),
        ])
        .unwrap();
        let sorted = data.sort_by(&["a"], false).unwrap();
        let b = sorted.field("b").unwrap();
        assert_eq!(b.value(0), Some(&Value::from("y")));
        assert_eq!(b.value(1), Some(&Value::from("z")));
        assert_eq!(b.value(2), Some(&Value::from("x")));
    }

    #[test]
    fn test_reorder_rejects_unknown_rows() {
        let data = Dataset::try_new([Field::numeric("a", [Some(1.0), Some(2.0)])]).unwrap();
        assert_eq!(
            data.reorder(&[1, 5]),
            Err(DataError::RowOutOfRange {
                row: 5,
                row_count: 2
            })
        );

        let reversed = data.reorder(&[1, 0]).unwrap();
        assert_eq!(reversed.field("a").unwrap().value(0), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_with_field_replaces() {
        let data = Dataset::try_new([Field::numeric("a", [Some(1.0)])])
            .unwrap()
            .with_field(Field::categorical("a", [Some("q")]))
            .unwrap();
        assert_eq!(data.fields().count(), 1);
        assert!(!data.field("a").unwrap().is_numeric());
    }
}
