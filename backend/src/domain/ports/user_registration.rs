//! Driving port for self-service registration.

use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, Error, Password, User};

/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: EmailAddress,
    pub password: Password,
    pub name: DisplayName,
}

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create a regular account. Duplicate emails are reported as
    /// `invalid_request` with `details.code = "email_taken"`.
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error>;
}
