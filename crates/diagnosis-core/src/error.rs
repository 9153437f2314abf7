use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// Rejected user input. `reason` is the message shown back to the user.
    #[error("{reason} (field: {field})")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    /// A product or quotient left the range of a 96-bit decimal.
    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Result store error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DiagnosisError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DiagnosisError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        DiagnosisError::Overflow {
            context: context.to_string(),
        }
    }
}

impl From<serde_json::Error> for DiagnosisError {
    fn from(e: serde_json::Error) -> Self {
        DiagnosisError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for DiagnosisError {
    fn from(e: std::io::Error) -> Self {
        DiagnosisError::Storage(e.to_string())
    }
}
