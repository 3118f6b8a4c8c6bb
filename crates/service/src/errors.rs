use thiserror::Error;

/// Failures of a contact or QR operation. `Display` yields the exact text
/// returned to HTTP clients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("Cannot store more than {limit} contacts.")]
    CapacityExceeded { limit: usize },
    #[error("{0}")]
    BadRequest(String),
    #[error("An error occurred: {0}")]
    Encoding(String),
}

impl ServiceError {
    pub fn no_contacts() -> Self { Self::NotFound("No contacts found.".into()) }

    pub fn contact_not_found() -> Self { Self::NotFound("Contact not found.".into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 1003,
            ServiceError::CapacityExceeded { .. } => 1005,
            ServiceError::BadRequest(_) => 1001,
            ServiceError::Encoding(_) => 1101,
        }
    }
}
