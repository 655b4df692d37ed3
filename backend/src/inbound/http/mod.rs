//! HTTP inbound adapter exposing the REST API and admin pages.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod routing;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
