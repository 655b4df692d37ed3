//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports are implemented by the domain services
//! and consumed by inbound adapters through `Arc<dyn _>` handles.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_users_query;
mod ingredient_repository;
mod ingredients;
mod login_service;
mod password_hasher;
mod token_authenticator;
mod token_repository;
mod user_profile;
mod user_registration;
mod user_repository;

pub use admin_users_query::AdminUsersQuery;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientPersistenceError, IngredientRepository};
pub use ingredients::{IngredientsCommand, IngredientsQuery};
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
pub use token_repository::{TokenPersistenceError, TokenRepository};
pub use user_profile::{ProfileUpdate, UserProfileCommand, UserProfileQuery};
pub use user_registration::{RegistrationRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
