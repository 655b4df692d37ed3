//! Port for bearer-token storage.
//!
//! Tokens are stored as digests, one row per user. Replacing a user's token
//! must be a single atomic operation so concurrent logins never leave two
//! live tokens behind.

use async_trait::async_trait;

use crate::domain::{TokenDigest, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token store adapters.
    pub enum TokenPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "token repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Store `digest` as the only live token for `user_id`.
    async fn replace(&self, user_id: &UserId, digest: &TokenDigest)
    -> Result<(), TokenPersistenceError>;

    /// Resolve a digest to its owner. Pure lookup.
    async fn find_user_id(&self, digest: &TokenDigest)
    -> Result<Option<UserId>, TokenPersistenceError>;

    /// Drop the live token for `user_id`, if any.
    async fn revoke(&self, user_id: &UserId) -> Result<(), TokenPersistenceError>;
}
