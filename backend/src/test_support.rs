//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`, which
//! enable the `test-support` feature. Everything here runs on the in-memory
//! stores with deliberately weak Argon2 parameters.

use std::sync::Arc;

use argon2::Params;

use crate::domain::{
    AccountService, DisplayName, EmailAddress, Error, IngredientService, Password, User,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryIngredientRepository, InMemoryTokenRepository, InMemoryUserRepository,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Argon2id with minimal cost so tests stay fast.
pub fn cheap_hasher() -> Argon2PasswordHasher {
    match Params::new(Params::MIN_M_COST, 1, 1, None) {
        Ok(params) => Argon2PasswordHasher::with_params(params),
        Err(_) => Argon2PasswordHasher::default(),
    }
}

/// Account and ingredient services sharing fresh in-memory stores.
pub fn in_memory_services() -> (AccountService, IngredientService) {
    let accounts = AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryTokenRepository::new()),
        Arc::new(cheap_hasher()),
    );
    let ingredients = IngredientService::new(Arc::new(InMemoryIngredientRepository::new()));
    (accounts, ingredients)
}

/// HTTP state plus a handle on the account service for seeding.
pub struct TestHarness {
    pub accounts: AccountService,
    pub state: HttpState,
}

impl TestHarness {
    pub fn new() -> Self {
        let (accounts, ingredients) = in_memory_services();
        let state = HttpState::from_services(accounts.clone(), ingredients);
        Self { accounts, state }
    }

    /// Seed a superuser directly through the service.
    pub async fn create_superuser(&self, email: &str, password: &str) -> Result<User, Error> {
        let email = EmailAddress::new(email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let password =
            Password::new(password).map_err(|err| Error::invalid_request(err.to_string()))?;
        self.accounts
            .create_superuser(email, password, DisplayName::default())
            .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
