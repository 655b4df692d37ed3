//! Driving ports for owner-scoped ingredient use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientId, IngredientName, UserId};

/// Read side of the ingredient use-cases.
#[async_trait]
pub trait IngredientsQuery: Send + Sync {
    /// The owner's ingredients, name descending.
    async fn list_ingredients(&self, owner: &UserId) -> Result<Vec<Ingredient>, Error>;

    /// One owned ingredient; foreign or missing ids are `not_found`.
    async fn fetch_ingredient(&self, owner: &UserId, id: &IngredientId)
    -> Result<Ingredient, Error>;
}

/// Write side of the ingredient use-cases.
#[async_trait]
pub trait IngredientsCommand: Send + Sync {
    async fn create_ingredient(
        &self,
        owner: &UserId,
        name: IngredientName,
    ) -> Result<Ingredient, Error>;

    async fn rename_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
        name: IngredientName,
    ) -> Result<Ingredient, Error>;

    async fn delete_ingredient(&self, owner: &UserId, id: &IngredientId) -> Result<(), Error>;
}
