pub mod linear;
pub mod log;

pub use linear::LinearNumericScale;
pub use log::LogNumericScale;
