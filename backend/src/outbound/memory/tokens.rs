//! In-memory `TokenRepository`, one digest per user.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{TokenPersistenceError, TokenRepository};
use crate::domain::{TokenDigest, UserId};

use super::POISONED;

#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<HashMap<UserId, TokenDigest>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, TokenDigest>>, TokenPersistenceError> {
        self.tokens
            .lock()
            .map_err(|_| TokenPersistenceError::query(POISONED))
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn replace(
        &self,
        user_id: &UserId,
        digest: &TokenDigest,
    ) -> Result<(), TokenPersistenceError> {
        self.lock()?.insert(*user_id, digest.clone());
        Ok(())
    }

    async fn find_user_id(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, TokenPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find_map(|(user_id, stored)| (stored == digest).then_some(*user_id)))
    }

    async fn revoke(&self, user_id: &UserId) -> Result<(), TokenPersistenceError> {
        self.lock()?.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthToken;

    #[tokio::test]
    async fn replacing_invalidates_previous_digest() {
        let repo = InMemoryTokenRepository::new();
        let user_id = UserId::random();
        let first = AuthToken::generate().digest();
        let second = AuthToken::generate().digest();

        repo.replace(&user_id, &first).await.expect("first");
        repo.replace(&user_id, &second).await.expect("second");

        assert_eq!(repo.find_user_id(&first).await.expect("lookup"), None);
        assert_eq!(
            repo.find_user_id(&second).await.expect("lookup"),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn revoke_removes_digest() {
        let repo = InMemoryTokenRepository::new();
        let user_id = UserId::random();
        let digest = AuthToken::generate().digest();
        repo.replace(&user_id, &digest).await.expect("store");

        repo.revoke(&user_id).await.expect("revoke");
        assert_eq!(repo.find_user_id(&digest).await.expect("lookup"), None);
    }
}
