//! Port abstraction for user persistence adapters and their errors.
//!
//! The store is the only arbiter of email uniqueness: `create` must check and
//! insert atomically and report collisions as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;

use crate::domain::{ProfileChanges, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "a user with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `DuplicateEmail` if the email is taken.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Apply profile changes and return the stored result, or `None` when
    /// the user no longer exists.
    async fn update_profile(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// All users ordered by email.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
