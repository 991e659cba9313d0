use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ClassError {
    /// Reason shown to a participant on the error screen, without the
    /// category prefix.
    pub fn reason(&self) -> String {
        match self {
            ClassError::NotFound(msg)
            | ClassError::Validation(msg)
            | ClassError::Authentication(msg)
            | ClassError::AccessDenied(msg)
            | ClassError::Provider(msg)
            | ClassError::Configuration(msg) => msg.clone(),
            ClassError::Database(err) => err.to_string(),
            ClassError::Internal(err) => err.to_string(),
        }
    }
}

pub type ClassResult<T> = Result<T, ClassError>;
