use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConsorcioError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Validation failed: {}", describe_validation(.consortium, .financing))]
    Validation {
        consortium: ValidationErrors,
        financing: ValidationErrors,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn describe_validation(consortium: &ValidationErrors, financing: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    if !consortium.is_empty() {
        parts.push(format!("consortium [{consortium}]"));
    }
    if !financing.is_empty() {
        parts.push(format!("financing [{financing}]"));
    }
    parts.join(", ")
}

impl From<serde_json::Error> for ConsorcioError {
    fn from(e: serde_json::Error) -> Self {
        ConsorcioError::SerializationError(e.to_string())
    }
}
