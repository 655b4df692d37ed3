//! PostgreSQL-backed `TokenRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TokenPersistenceError, TokenRepository};
use crate::domain::{TokenDigest, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewAuthTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Diesel-backed token store keyed by user id.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TokenPersistenceError {
    map_basic_pool_error(error, TokenPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TokenPersistenceError {
    map_basic_diesel_error(
        error,
        TokenPersistenceError::query,
        TokenPersistenceError::connection,
    )
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn replace(
        &self,
        user_id: &UserId,
        digest: &TokenDigest,
    ) -> Result<(), TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAuthTokenRow {
            user_id: *user_id.as_uuid(),
            digest: digest.as_str(),
            created_at: Utc::now(),
        };

        // Single statement so concurrent logins cannot leave two rows behind.
        diesel::insert_into(auth_tokens::table)
            .values(&row)
            .on_conflict(auth_tokens::user_id)
            .do_update()
            .set((
                auth_tokens::digest.eq(excluded(auth_tokens::digest)),
                auth_tokens::created_at.eq(excluded(auth_tokens::created_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_user_id(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id: Option<uuid::Uuid> = auth_tokens::table
            .filter(auth_tokens::digest.eq(digest.as_str()))
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(user_id.map(UserId::from_uuid))
    }

    async fn revoke(&self, user_id: &UserId) -> Result<(), TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(auth_tokens::table.filter(auth_tokens::user_id.eq(user_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
