use crate::core::data_type::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown data type: {0}")]
    UnknownType(String),

    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    #[error("Cannot write {value} as a {data_type} literal: {reason}")]
    InvalidLiteral {
        value: String,
        data_type: DataType,
        reason: String,
    },
}
