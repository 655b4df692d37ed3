//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminUsersQuery, IngredientsCommand, IngredientsQuery, LoginService, TokenAuthenticator,
    UserProfileCommand, UserProfileQuery, UserRegistration,
};
use crate::domain::{AccountService, IngredientService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub authenticator: Arc<dyn TokenAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub ingredients: Arc<dyn IngredientsQuery>,
    pub ingredients_command: Arc<dyn IngredientsCommand>,
    pub admin_users: Arc<dyn AdminUsersQuery>,
}

impl HttpState {
    /// Wire every port to the two domain services.
    pub fn from_services(accounts: AccountService, ingredients: IngredientService) -> Self {
        let accounts = Arc::new(accounts);
        let ingredients = Arc::new(ingredients);
        Self {
            registration: accounts.clone(),
            login: accounts.clone(),
            authenticator: accounts.clone(),
            profile: accounts.clone(),
            profile_command: accounts.clone(),
            ingredients: ingredients.clone(),
            ingredients_command: ingredients,
            admin_users: accounts,
        }
    }
}
