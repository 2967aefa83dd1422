use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    ValidationError { field: &'static str, message: String },

    // Display leaves the submitted number out so it never reaches the log.
    #[error("Valid contact number is required.")]
    InvalidPhoneNumber(String),

    #[error("Donor with this contact already exists")]
    DuplicateContact(String),

    #[error("Donor not found with id: {0}")]
    DonorNotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid query format.")]
    InvalidQueryFormat { blood_type: String, location: String },

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::ValidationError {
            field,
            message: message.into(),
        }
    }

    /// Stable category string surfaced to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::ValidationError { .. } => "validation_error",
            DomainError::InvalidPhoneNumber(_) => "invalid_phone_number",
            DomainError::DuplicateContact(_) => "duplicate_contact",
            DomainError::DonorNotFound(_) => "not_found",
            DomainError::Unauthorized => "unauthorized",
            DomainError::InvalidQueryFormat { .. } => "invalid_query_format",
            DomainError::RepositoryError(_) | DomainError::NetworkError(_) => "server_error",
        }
    }
}
