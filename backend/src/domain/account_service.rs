//! Account domain service.
//!
//! Implements registration, token login, bearer-token authentication,
//! profile reads/updates and the admin user queries on top of the user and
//! token stores plus the password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AdminUsersQuery, LoginService, PasswordHashError, PasswordHasher, ProfileUpdate,
    RegistrationRequest, TokenAuthenticator, TokenPersistenceError, TokenRepository,
    UserPersistenceError, UserProfileCommand, UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::{
    AuthToken, DisplayName, EmailAddress, Error, LoginCredentials, Password, ProfileChanges,
    User, UserFlags, UserId,
};

/// Message shared by every failed login so callers cannot tell which part
/// of the credentials was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "unable to authenticate with provided credentials";

/// Message returned by the auth gate for tokens that resolve to no one.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid token";

/// Account service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create a new service with the given stores and hasher.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::invalid_request("user with this email already exists").with_details(json!({
                    "field": "email",
                    "code": "email_taken",
                }))
            }
        }
    }

    fn map_token_error(error: TokenPersistenceError) -> Error {
        match error {
            TokenPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("token repository unavailable: {message}"))
            }
            TokenPersistenceError::Query { message } => {
                Error::internal(format!("token repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }

    fn invalid_credentials() -> Error {
        Error::invalid_request(INVALID_CREDENTIALS_MESSAGE)
    }

    async fn create_account(
        &self,
        email: EmailAddress,
        password: &Password,
        name: DisplayName,
        flags: UserFlags,
    ) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(password.expose())
            .await
            .map_err(Self::map_hash_error)?;
        let user = User::register(email, name, password_hash, flags);
        self.users
            .create(&user)
            .await
            .map_err(Self::map_user_error)?;
        Ok(user)
    }

    /// Check an email/password pair and return the matching active user.
    ///
    /// Unknown emails still pay for one hash so the response time does not
    /// reveal whether the account exists.
    pub async fn verify_credentials(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?;

        let Some(user) = found else {
            self.hasher
                .hash(credentials.password())
                .await
                .map_err(Self::map_hash_error)?;
            return Err(Self::invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(Self::map_hash_error)?;

        if !matches || !user.is_active() {
            return Err(Self::invalid_credentials());
        }
        Ok(user)
    }

    /// Create a superuser account. Used by the `create-superuser` binary.
    pub async fn create_superuser(
        &self,
        email: EmailAddress,
        password: Password,
        name: DisplayName,
    ) -> Result<User, Error> {
        let user = self
            .create_account(email, &password, name, UserFlags::superuser())
            .await?;
        info!(user_id = %user.id(), "superuser created");
        Ok(user)
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[async_trait]
impl UserRegistration for AccountService {
    async fn register(&self, request: RegistrationRequest) -> Result<User, Error> {
        let RegistrationRequest {
            email,
            password,
            name,
        } = request;
        let user = self
            .create_account(email, &password, name, UserFlags::regular())
            .await?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let user = self.verify_credentials(credentials).await?;
        let token = AuthToken::generate();
        self.tokens
            .replace(user.id(), &token.digest())
            .await
            .map_err(Self::map_token_error)?;
        debug!(user_id = %user.id(), "token issued");
        Ok(token)
    }

    async fn revoke_token(&self, user_id: &UserId) -> Result<(), Error> {
        self.tokens
            .revoke(user_id)
            .await
            .map_err(Self::map_token_error)?;
        debug!(user_id = %user_id, "token revoked");
        Ok(())
    }
}

#[async_trait]
impl TokenAuthenticator for AccountService {
    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error> {
        let Some(user_id) = self
            .tokens
            .find_user_id(&token.digest())
            .await
            .map_err(Self::map_token_error)?
        else {
            return Err(Error::unauthorized(INVALID_TOKEN_MESSAGE));
        };

        match self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(Self::map_user_error)?
        {
            Some(user) if user.is_active() => Ok(user),
            _ => Err(Error::unauthorized(INVALID_TOKEN_MESSAGE)),
        }
    }
}

#[async_trait]
impl UserProfileQuery for AccountService {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.load_user(user_id).await
    }
}

#[async_trait]
impl UserProfileCommand for AccountService {
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<User, Error> {
        let ProfileUpdate { name, password } = update;
        let password_hash = match password {
            Some(password) => Some(
                self.hasher
                    .hash(password.expose())
                    .await
                    .map_err(Self::map_hash_error)?,
            ),
            None => None,
        };
        let changes = ProfileChanges {
            name,
            password_hash,
        };
        if changes.is_empty() {
            return self.load_user(user_id).await;
        }

        self.users
            .update_profile(user_id, &changes)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[async_trait]
impl AdminUsersQuery for AccountService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(Self::map_user_error)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        self.load_user(id).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
