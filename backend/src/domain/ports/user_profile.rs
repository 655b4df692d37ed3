//! Driving ports for the caller's own profile.
//!
//! Neither port takes an identifier from the client: the user id always
//! comes from the authenticated principal.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, Password, User, UserId};

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<DisplayName>,
    pub password: Option<Password>,
}

/// Domain use-case port for reading the current user's profile.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile for the authenticated user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}

/// Domain use-case port for updating the current user's profile.
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply `update`, re-hashing the password when one is supplied.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<User, Error>;
}
