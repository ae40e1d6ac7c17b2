// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Note has no id: {0}")]
    MissingId(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Session has been signed out")]
    SignedOut,
    #[error("Configuration error: {0}")]
    Config(String),
}
