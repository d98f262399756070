use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing modification data: {0}")]
    MissingModification(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LeaseError {
    fn from(e: serde_json::Error) -> Self {
        LeaseError::SerializationError(e.to_string())
    }
}
