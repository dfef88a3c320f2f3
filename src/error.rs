//! Error types shared by the models and the persistence services.

use thiserror::Error;

/// A record failed field-level validation before reaching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event title cannot be empty")]
    EmptyTitle,

    #[error("Event end time must be after start time")]
    EndNotAfterStart,

    #[error("Color must be in hex format (#RRGGBB or #RGB), got '{0}'")]
    InvalidColor(String),

    #[error("Invalid settings: {0}")]
    Settings(String),
}

/// Errors surfaced by an [`EventStore`](crate::services::event::EventStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced id does not exist (or belongs to another owner).
    #[error("Event with id {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// True for consistency failures that callers treat as a no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Errors surfaced by the account service.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
