//! Driving port used by the HTTP auth gate to resolve bearer tokens.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, User};

/// Resolve a presented token to the live, active user it is bound to.
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Returns `unauthorized` when the token is unknown or the user inactive.
    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error>;
}
