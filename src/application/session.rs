// src/application/session.rs
use crate::domain::DomainError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as `x-api-key`
    ApiKey(String),
    /// Sent as `Authorization: Bearer ...`
    Bearer(String),
    Anonymous,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Capability handed to everything that may only act inside an
/// authenticated session.
///
/// Signing out is one-way: after `sign_out` every gated operation fails with
/// `DomainError::SignedOut`.
#[derive(Debug)]
pub struct Session {
    user: String,
    credentials: Credentials,
    active: AtomicBool,
}

impl Session {
    pub fn new(user: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            user: user.into(),
            credentials,
            active: AtomicBool::new(true),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::SignedOut)
        }
    }

    /// Credentials of a live session.
    pub fn credentials(&self) -> Result<&Credentials, DomainError> {
        self.ensure_active()?;
        Ok(&self.credentials)
    }

    pub fn sign_out(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            info!(user = %self.user, "Signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_active_session_when_signing_out_then_credentials_are_refused() {
        // Arrange
        let session = Session::new("alice", Credentials::ApiKey("secret".to_string()));
        assert!(session.credentials().is_ok());

        // Act
        session.sign_out();

        // Assert
        assert!(!session.is_active());
        assert_eq!(session.credentials(), Err(DomainError::SignedOut));
    }

    #[test]
    fn given_credentials_when_debug_printing_then_secret_is_masked() {
        let printed = format!("{:?}", Credentials::Bearer("token".to_string()));
        assert!(!printed.contains("token"));
    }
}
