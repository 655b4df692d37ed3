//! Ingredient domain service.
//!
//! Every operation is scoped to the owner passed in by the caller, which the
//! HTTP adapter always takes from the authenticated principal.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    IngredientPersistenceError, IngredientRepository, IngredientsCommand, IngredientsQuery,
};
use crate::domain::{Error, Ingredient, IngredientId, IngredientName, UserId};

/// Ingredient service implementing the ingredient driving ports.
#[derive(Clone)]
pub struct IngredientService {
    repo: Arc<dyn IngredientRepository>,
}

impl IngredientService {
    /// Create a new service over the given store.
    pub fn new(repo: Arc<dyn IngredientRepository>) -> Self {
        Self { repo }
    }

    fn map_repo_error(error: IngredientPersistenceError) -> Error {
        match error {
            IngredientPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
            }
            IngredientPersistenceError::Query { message } => {
                Error::internal(format!("ingredient repository error: {message}"))
            }
        }
    }

    fn missing(id: &IngredientId) -> Error {
        Error::not_found(format!("ingredient {id} not found"))
    }
}

#[async_trait]
impl IngredientsQuery for IngredientService {
    async fn list_ingredients(&self, owner: &UserId) -> Result<Vec<Ingredient>, Error> {
        let mut ingredients = self
            .repo
            .list_for_owner(owner)
            .await
            .map_err(Self::map_repo_error)?;
        ingredients.sort_by(Ingredient::listing_order);
        Ok(ingredients)
    }

    async fn fetch_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<Ingredient, Error> {
        self.repo
            .find_for_owner(owner, id)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| Self::missing(id))
    }
}

#[async_trait]
impl IngredientsCommand for IngredientService {
    async fn create_ingredient(
        &self,
        owner: &UserId,
        name: IngredientName,
    ) -> Result<Ingredient, Error> {
        let ingredient = Ingredient::create(*owner, name);
        self.repo
            .create(&ingredient)
            .await
            .map_err(Self::map_repo_error)?;
        debug!(ingredient_id = %ingredient.id(), owner = %owner, "ingredient created");
        Ok(ingredient)
    }

    async fn rename_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
        name: IngredientName,
    ) -> Result<Ingredient, Error> {
        self.repo
            .rename_for_owner(owner, id, &name)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| Self::missing(id))
    }

    async fn delete_ingredient(&self, owner: &UserId, id: &IngredientId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_for_owner(owner, id)
            .await
            .map_err(Self::map_repo_error)?;
        if removed {
            debug!(ingredient_id = %id, owner = %owner, "ingredient deleted");
            Ok(())
        } else {
            Err(Self::missing(id))
        }
    }
}
