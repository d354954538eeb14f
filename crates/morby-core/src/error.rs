use thiserror::Error;

#[derive(Debug, Error)]
pub enum MorbyError {
    #[error("Invalid term: {field} resolves to zero payment periods")]
    InvalidTerm { field: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MorbyError {
    fn from(e: serde_json::Error) -> Self {
        MorbyError::SerializationError(e.to_string())
    }
}
