//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users        {"email":"a@b.com","password":"secret","name":"Ada"}
//! POST   /api/v1/users/token  {"email":"a@b.com","password":"secret"}
//! DELETE /api/v1/users/token
//! GET    /api/v1/users/me
//! PATCH  /api/v1/users/me     {"name":"Ada L."}
//! ```
//!
//! Responses never include the password or its hash.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ProfileUpdate, RegistrationRequest};
use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, LoginValidationError, Password, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, AuthenticatedJson};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, PASSWORD, map_password_error, map_user_validation_error, missing_field_error,
    require,
};

/// Registration payload. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "test@example.com")]
    pub email: Option<String>,
    #[schema(example = "testpass123")]
    pub password: Option<String>,
    #[schema(example = "Test Name")]
    pub name: Option<String>,
}

/// Login payload for token issuance.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

/// Partial profile update. Any other field is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "test@example.com")]
    pub email: String,
    #[schema(example = "Test Name")]
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email().to_string(),
            name: user.name().to_string(),
        }
    }
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let raw_email = require(value.email, EMAIL)?;
        let raw_password = require(value.password, PASSWORD)?;
        let email =
            EmailAddress::new(raw_email).map_err(|err| map_user_validation_error(err, EMAIL))?;
        let password = Password::new(&raw_password).map_err(map_password_error)?;
        let name = parse_display_name(value.name.unwrap_or_default())?;
        Ok(Self {
            email,
            password,
            name,
        })
    }
}

impl TryFrom<UpdateProfileRequest> for ProfileUpdate {
    type Error = Error;

    fn try_from(value: UpdateProfileRequest) -> Result<Self, Self::Error> {
        let name = value.name.map(parse_display_name).transpose()?;
        let password = value
            .password
            .map(|raw| Password::new(&raw).map_err(map_password_error))
            .transpose()?;
        Ok(Self { name, password })
    }
}

fn parse_display_name(raw: String) -> Result<DisplayName, Error> {
    DisplayName::new(raw).map_err(|err| map_user_validation_error(err, NAME))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => missing_field_error(EMAIL),
        LoginValidationError::EmptyPassword => missing_field_error(PASSWORD),
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let user = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange email and password for a bearer token.
///
/// Each successful call rotates the token: the previous one stops working.
#[utoipa::path(
    post,
    path = "/api/v1/users/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "issueToken",
    security([])
)]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(map_login_validation_error)?;
    let token = state.login.issue_token(&credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.expose().to_owned(),
    }))
}

/// Revoke the caller's token.
#[utoipa::path(
    delete,
    path = "/api/v1/users/token",
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "revokeToken",
    security(("token" = []))
)]
pub async fn revoke_token(
    state: web::Data<HttpState>,
    principal: Authenticated,
) -> ApiResult<HttpResponse> {
    state.login.revoke_token(principal.user().id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 405, description = "Method not allowed", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("token" = []))
)]
pub async fn current_user(
    state: web::Data<HttpState>,
    principal: Authenticated,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.profile.fetch_profile(principal.user().id()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Update the caller's name and/or password. Also served for `PUT`.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser",
    security(("token" = []))
)]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    request: AuthenticatedJson<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let (principal, payload) = request.into_parts();
    let update = ProfileUpdate::try_from(payload)?;
    let user = state
        .profile_command
        .update_profile(principal.id(), update)
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}
