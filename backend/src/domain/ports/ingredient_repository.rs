//! Port for ingredient persistence.
//!
//! Every read and write is keyed by the owning user; adapters must filter on
//! the owner so a caller can never observe or touch another user's rows.

use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId, IngredientName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient store adapters.
    pub enum IngredientPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ingredient repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Insert a new ingredient.
    async fn create(&self, ingredient: &Ingredient) -> Result<(), IngredientPersistenceError>;

    /// The owner's ingredients, name descending.
    async fn list_for_owner(&self, owner: &UserId)
    -> Result<Vec<Ingredient>, IngredientPersistenceError>;

    /// One ingredient if it exists and belongs to `owner`.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError>;

    /// Rename an owned ingredient, returning the updated row.
    async fn rename_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError>;

    /// Delete an owned ingredient. Returns whether a row was removed.
    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<bool, IngredientPersistenceError>;
}
