//! Builders for the HTTP state from configured store adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use recipe_backend::domain::ports::{IngredientRepository, TokenRepository, UserRepository};
use recipe_backend::domain::{AccountService, IngredientService};
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::{
    InMemoryIngredientRepository, InMemoryTokenRepository, InMemoryUserRepository,
};
use recipe_backend::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselTokenRepository, DieselUserRepository,
};
use recipe_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

type Stores = (
    Arc<dyn UserRepository>,
    Arc<dyn TokenRepository>,
    Arc<dyn IngredientRepository>,
);

fn diesel_stores(pool: &DbPool) -> Stores {
    (
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselTokenRepository::new(pool.clone())),
        Arc::new(DieselIngredientRepository::new(pool.clone())),
    )
}

fn memory_stores() -> Stores {
    warn!("no database configured; accounts and ingredients are kept in memory");
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryTokenRepository::new()),
        Arc::new(InMemoryIngredientRepository::new()),
    )
}

/// Build the services over Diesel stores when a pool is configured,
/// otherwise over in-memory stores.
fn build_services(config: &ServerConfig) -> (AccountService, IngredientService) {
    let (users, tokens, ingredients) = match &config.db_pool {
        Some(pool) => diesel_stores(pool),
        None => memory_stores(),
    };
    (
        AccountService::new(users, tokens, Arc::new(Argon2PasswordHasher::default())),
        IngredientService::new(ingredients),
    )
}

/// Build the shared HTTP state.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (accounts, ingredients) = build_services(config);
    web::Data::new(HttpState::from_services(accounts, ingredients))
}
