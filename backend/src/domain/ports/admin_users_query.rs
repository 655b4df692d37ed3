//! Driving port behind the administrative user pages.
//!
//! Callers are expected to have checked the superuser flag already; the
//! HTTP adapter does so in its `AdminUser` extractor.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait AdminUsersQuery: Send + Sync {
    /// Every account, ordered by email.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One account by id; unknown ids are `not_found`.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
