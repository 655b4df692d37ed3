//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence adapters, plus the services that enforce the authentication
//! and per-user isolation rules.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic API error payload.
//! - User, EmailAddress, DisplayName: account identity.
//! - LoginCredentials, Password, AuthToken: authentication inputs.
//! - Ingredient: the owner-scoped resource.
//! - AccountService / IngredientService: driving port implementations.

mod account_service;
pub mod auth;
pub mod error;
pub mod ingredient;
mod ingredient_service;
pub mod ports;
mod trace_id;
pub mod user;

pub use self::account_service::{
    AccountService, INVALID_CREDENTIALS_MESSAGE, INVALID_TOKEN_MESSAGE,
};
pub use self::auth::{
    AuthToken, LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH, Password,
    PasswordValidationError, TOKEN_LENGTH, TokenDigest, TokenValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ingredient::{
    INGREDIENT_NAME_MAX, Ingredient, IngredientId, IngredientName, IngredientValidationError,
};
pub use self::ingredient_service::IngredientService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, EmailAddress, PasswordHash, ProfileChanges, User,
    UserFlags, UserId, UserParts, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
