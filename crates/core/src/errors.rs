use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Store error: {0}")]
    Store(#[from] eyre::Report),

    #[error("Geocoding error: {0}")]
    Geocode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StudyError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        StudyError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type StudyResult<T> = Result<T, StudyError>;
