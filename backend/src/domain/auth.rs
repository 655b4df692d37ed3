//! Authentication primitives: login credentials, passwords and bearer tokens.
//!
//! Inbound adapters build these through their validating constructors before
//! talking to a port, so services only ever see well-formed input.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::normalize_email;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised the same way stored addresses are, so lookups are
///   case-insensitive. It is deliberately not syntax-checked: a malformed
///   address simply fails to authenticate.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Test@Test.com", "password").unwrap();
/// assert_eq!(creds.email(), "test@test.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 5;

/// Validation errors for new passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    /// Password shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },
}

/// Plaintext password chosen by a user, validated against the length policy.
///
/// Only exists long enough to be hashed; the buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::{Password, PasswordValidationError};
    ///
    /// assert!(Password::new("pwd").is_err());
    /// assert!(Password::new("password").is_ok());
    /// ```
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext for the hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 20;
/// Length of the hex-encoded token.
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Validation errors for presented bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenValidationError {
    #[error("token must be {expected} lowercase hexadecimal characters")]
    Malformed { expected: usize },
}

/// Opaque bearer token handed to clients after a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Generate a fresh token from OS randomness.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(Zeroizing::new(hex::encode(bytes)))
    }

    /// Parse a token presented by a client.
    pub fn parse(raw: &str) -> Result<Self, TokenValidationError> {
        let well_formed = raw.len() == TOKEN_LENGTH
            && raw
                .bytes()
                .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte));
        if !well_formed {
            return Err(TokenValidationError::Malformed {
                expected: TOKEN_LENGTH,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Token value to return to the client.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Fingerprint stored at rest instead of the token itself.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 fingerprint of an [`AuthToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wrap a digest read back from storage.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("one", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_debug_hides_password() {
        let creds = LoginCredentials::try_from_parts("a@b.com", "hunter22").expect("valid");
        assert!(!format!("{creds:?}").contains("hunter22"));
    }

    #[rstest]
    #[case("pwd", false)]
    #[case("four", false)]
    #[case("fives", true)]
    #[case("password", true)]
    #[case("ünïcø", true)]
    fn password_length_policy(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(Password::new(raw).is_ok(), accepted);
    }

    #[rstest]
    fn generated_tokens_parse_and_differ() {
        let first = AuthToken::generate();
        let second = AuthToken::generate();
        assert_eq!(first.expose().len(), TOKEN_LENGTH);
        assert_ne!(first, second);
        assert_eq!(AuthToken::parse(first.expose()).expect("parse"), first);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ")]
    #[case("9944B09199C62BCF9418AD846DD0E4BBDFC6EE4B")]
    fn malformed_tokens_are_rejected(#[case] raw: &str) {
        assert!(AuthToken::parse(raw).is_err());
    }

    #[rstest]
    fn digest_is_stable_and_hides_token() {
        let token = AuthToken::generate();
        let digest = token.digest();
        assert_eq!(digest, token.digest());
        assert_eq!(digest.as_str().len(), 64);
        assert_ne!(digest.as_str(), token.expose());
    }
}
