//! Domain Errors
//!
//! Error types for domain and storage operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid format: {field} must be YYYY-MM-DD, got {value:?}")]
    InvalidFormat { field: String, value: String },

    #[error("Invalid range: end date {end} is earlier than start date {start}")]
    InvalidRange { start: String, end: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate key: {entity_type} with id {id} already exists")]
    DuplicateKey { entity_type: String, id: String },

    #[error("Immutable field: {field} cannot be changed")]
    ImmutableField { field: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: u64) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn duplicate_key<T: AsRef<str>>(entity_type: T, id: u64) -> Self {
        Self::DuplicateKey {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn invalid_format<T: AsRef<str>>(field: T, value: &str) -> Self {
        Self::InvalidFormat {
            field: field.as_ref().to_string(),
            value: value.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
