pub mod array;
pub mod bins;
pub mod config;
pub mod infer;
pub mod numeric;
pub mod spec;
pub mod temporal;
pub mod transform;

pub use bins::optimal_bin_count;
pub use config::ScaleOptions;
pub use infer::make_numeric_scale;
pub use spec::ScaleSpec;
pub use transform::{choose_transform, set_transform};
