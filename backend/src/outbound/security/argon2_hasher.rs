//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU bound, so both operations run on tokio's blocking pool.
//! Hashes are PHC strings that embed their own parameters, which lets a
//! hasher verify hashes produced with different settings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id password hasher.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    /// OWASP-recommended Argon2id defaults from the `argon2` crate.
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters, e.g. a cheap set for tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.to_owned());

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::argon2(params)
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash::from_phc(hash.to_string()))
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.to_owned());
        let phc = hash.as_phc().to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = PhcHash::new(&phc)
                .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
            match Self::argon2(params).verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PhcError::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
            }
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(8, 1, 1, None).expect("cheap params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_differs_from_plaintext_and_verifies(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("testpass123").await.expect("hash");

        assert_ne!(hash.as_phc(), "testpass123");
        assert!(hash.as_phc().starts_with("$argon2id$"));
        assert!(hasher.verify("testpass123", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrongpass", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_make_hashes_unique(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("testpass123").await.expect("hash");
        let second = hasher.hash("testpass123").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_errors(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("testpass123", &PasswordHash::from_phc("plaintext"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
