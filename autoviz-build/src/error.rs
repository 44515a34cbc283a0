use autoviz_data::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: `{0}`")]
    Configuration(String),

    #[error("Data error: `{0}`")]
    Data(#[from] DataError),

    #[error("Invalid chart configuration JSON: `{0}`")]
    Json(#[from] serde_json::Error),
}
