//! PostgreSQL-backed `IngredientRepository` implementation using Diesel.
//!
//! Every statement filters on `owner_id`, so rows belonging to another user
//! are indistinguishable from missing ones.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{IngredientPersistenceError, IngredientRepository};
use crate::domain::{Ingredient, IngredientId, IngredientName, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed owner-scoped ingredient store.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientPersistenceError {
    map_basic_pool_error(error, IngredientPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IngredientPersistenceError {
    map_basic_diesel_error(
        error,
        IngredientPersistenceError::query,
        IngredientPersistenceError::connection,
    )
}

fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, IngredientPersistenceError> {
    let name = IngredientName::new(&row.name).map_err(|err| {
        warn!(ingredient_id = %row.id, error = %err, "stored ingredient name failed validation");
        IngredientPersistenceError::query(format!("stored name for ingredient {} is invalid", row.id))
    })?;
    Ok(Ingredient::restore(
        IngredientId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        name,
    ))
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn create(&self, ingredient: &Ingredient) -> Result<(), IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewIngredientRow {
            id: *ingredient.id().as_uuid(),
            owner_id: *ingredient.owner().as_uuid(),
            name: ingredient.name().as_ref(),
        };

        diesel::insert_into(ingredients::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::owner_id.eq(owner.as_uuid()))
            .order((ingredients::name.desc(), ingredients::id.asc()))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_ingredient).collect()
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id.as_uuid()))
            .filter(ingredients::owner_id.eq(owner.as_uuid()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_ingredient).transpose()
    }

    async fn rename_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = diesel::update(
            ingredients::table
                .filter(ingredients::id.eq(id.as_uuid()))
                .filter(ingredients::owner_id.eq(owner.as_uuid())),
        )
        .set(ingredients::name.eq(name.as_ref()))
        .returning(IngredientRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_ingredient).transpose()
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<bool, IngredientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            ingredients::table
                .filter(ingredients::id.eq(id.as_uuid()))
                .filter(ingredients::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
