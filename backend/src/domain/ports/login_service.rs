//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing how tokens or users are stored.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials, UserId};

/// Domain use-case port for token issuance.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a fresh token, replacing any previous one.
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Invalidate the live token of `user_id`.
    async fn revoke_token(&self, user_id: &UserId) -> Result<(), Error>;
}
