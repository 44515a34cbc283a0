#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("Field not found: `{0}`")]
    FieldNotFound(String),

    #[error("Duplicate field name: `{0}`")]
    DuplicateField(String),

    #[error("Field `{field}` has {actual} rows but the dataset has {expected}")]
    RowCountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} is out of range for a dataset with {row_count} rows")]
    RowOutOfRange { row: usize, row_count: usize },
}
