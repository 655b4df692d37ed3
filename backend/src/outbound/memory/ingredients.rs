//! In-memory `IngredientRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{IngredientPersistenceError, IngredientRepository};
use crate::domain::{Ingredient, IngredientId, IngredientName, UserId};

use super::POISONED;

#[derive(Debug, Default)]
pub struct InMemoryIngredientRepository {
    ingredients: Mutex<HashMap<IngredientId, Ingredient>>,
}

impl InMemoryIngredientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<IngredientId, Ingredient>>, IngredientPersistenceError> {
        self.ingredients
            .lock()
            .map_err(|_| IngredientPersistenceError::query(POISONED))
    }
}

fn owned_by<'a>(owner: &'a UserId) -> impl Fn(&&Ingredient) -> bool + 'a {
    move |ingredient| ingredient.owner() == owner
}

#[async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn create(&self, ingredient: &Ingredient) -> Result<(), IngredientPersistenceError> {
        self.lock()?.insert(*ingredient.id(), ingredient.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError> {
        let mut owned: Vec<Ingredient> = self
            .lock()?
            .values()
            .filter(owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(Ingredient::listing_order);
        Ok(owned)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError> {
        Ok(self.lock()?.get(id).filter(owned_by(owner)).cloned())
    }

    async fn rename_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError> {
        let mut ingredients = self.lock()?;
        let Some(current) = ingredients.get(id).filter(owned_by(owner)).cloned() else {
            return Ok(None);
        };
        let renamed = current.renamed(name.clone());
        ingredients.insert(*id, renamed.clone());
        Ok(Some(renamed))
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<bool, IngredientPersistenceError> {
        let mut ingredients = self.lock()?;
        if ingredients.get(id).filter(owned_by(owner)).is_none() {
            return Ok(false);
        }
        Ok(ingredients.remove(id).is_some())
    }
}
