use model::error::ModelError;
use thiserror::Error;

/// Errors raised while compiling a condition or resolving a compiled one.
///
/// None of them are transient: the same condition and binding always fail
/// the same way.
#[derive(Debug, Error)]
pub enum FilterError {
    /// An operator received an operand of the wrong structural category.
    #[error("Malformed operand for {operator}: {operand} ({message})")]
    MalformedOperand {
        operator: String,
        operand: String,
        message: String,
    },

    /// A node kind or operator the document filter grammar cannot express.
    #[error("Unsupported operation {operation}: {message}")]
    UnsupportedOperation { operation: String, message: String },

    #[error("No value bound for variable '{variable}' (placeholder {token})")]
    UnresolvedBinding { variable: String, token: String },

    /// A placeholder value that cannot be written as a scalar literal.
    #[error("Cannot render placeholder {token}: {source}")]
    InvalidLiteral {
        token: String,
        #[source]
        source: ModelError,
    },

    #[error("Resolved filter is not a valid document: {text}: {source}")]
    MalformedFilterText {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// The compiler was driven in an order that broke its own invariants.
    #[error("Internal compiler error: {0}")]
    Internal(String),
}

impl FilterError {
    pub(crate) fn malformed(
        operator: impl Into<String>,
        operand: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FilterError::MalformedOperand {
            operator: operator.into(),
            operand: operand.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(operation: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::UnsupportedOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
