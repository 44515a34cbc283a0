pub mod compare;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod field;
pub mod stats;
pub mod types;
pub mod value;

pub use compare::RowComparator;
pub use convert::{FieldConverter, SamplingConfig};
pub use dataset::Dataset;
pub use error::DataError;
pub use field::Field;
pub use stats::FieldStats;
pub use types::{DateUnit, FieldRole, TransformKind};
pub use value::Value;
