//! Bearer-token auth gate.
//!
//! [`Authenticated`] is the single enforcement point for protected
//! endpoints: it reads the `Authorization` header, resolves the token
//! through the [`TokenAuthenticator`](crate::domain::ports::TokenAuthenticator)
//! port, and hands the handler the resolved principal. Handlers never read
//! an owner or user id from the request body or path.
//!
//! Accepted header forms: `Token <key>` and `Bearer <key>`, with the scheme
//! matched case-insensitively.
//!
//! Handlers that also read a JSON body take [`AuthenticatedJson`], which
//! leaves the payload untouched until the principal has resolved.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{AuthToken, Error, INVALID_TOKEN_MESSAGE, User};
use crate::inbound::http::state::HttpState;

/// Message used when no usable `Authorization` header is present.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "authentication credentials were not provided";

const SCHEMES: [&str; 2] = ["token", "bearer"];

/// Extract the token from the `Authorization` header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<AuthToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized(INVALID_TOKEN_MESSAGE))?;

    let mut parts = value.split_whitespace();
    let scheme = parts
        .next()
        .filter(|scheme| SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)))
        .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))?;

    match (parts.next(), parts.next()) {
        (Some(key), None) => AuthToken::parse(key).map_err(|err| {
            debug!(scheme, error = %err, "rejected malformed token");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        }),
        _ => Err(Error::unauthorized(INVALID_TOKEN_MESSAGE)),
    }
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

/// The authenticated principal for the current request.
#[derive(Debug, Clone)]
pub struct Authenticated(User);

impl Authenticated {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = resolve_principal(req);
        Box::pin(async move { Ok(Self(principal.await?)) })
    }
}

fn resolve_principal(req: &HttpRequest) -> LocalBoxFuture<'static, Result<User, Error>> {
    let state = http_state(req);
    let token = bearer_token(req);
    Box::pin(async move {
        let state = state?;
        let token = token?;
        state.authenticator.authenticate(&token).await
    })
}

/// The authenticated principal plus a JSON body read only after the
/// principal resolved.
///
/// The body goes through the app's `JsonConfig`, so size limits and the
/// `malformed_body` error shape match plain `web::Json`.
#[derive(Debug)]
pub struct AuthenticatedJson<T> {
    principal: User,
    body: T,
}

impl<T> AuthenticatedJson<T> {
    pub fn into_parts(self) -> (User, T) {
        (self.principal, self.body)
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for AuthenticatedJson<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let principal = resolve_principal(req);
        let req = req.clone();
        let mut payload = payload.take();
        Box::pin(async move {
            let principal = principal.await?;
            let body = web::Json::<T>::from_request(&req, &mut payload).await?;
            Ok(Self {
                principal,
                body: body.into_inner(),
            })
        })
    }
}

/// An authenticated principal that is also a superuser.
#[derive(Debug, Clone)]
pub struct AdminUser(User);

impl AdminUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let authenticated = Authenticated::from_request(req, payload);
        Box::pin(async move {
            let user = authenticated.await?.into_inner();
            if !user.is_superuser() {
                return Err(Error::forbidden("superuser access required"));
            }
            Ok(Self(user))
        })
    }
}
