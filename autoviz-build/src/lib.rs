pub mod config;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod plan;

pub use config::{ChartConfig, Diagram, Element, Interaction};
pub use error::BuildError;
pub use keys::{is_usable_key, select_keys, split_fields, KeySpec};
pub use pipeline::{build_pipeline, Stage, TransformCommand, TransformParameters};
pub use plan::DataPlan;
