use filter_engine::FilterError;
use model::error::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize input as JSON: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to serialize output to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid input: {0}")]
    Model(#[from] ModelError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}
