//! User data model.
//!
//! A user is identified internally by a UUID and externally by a normalised
//! email address. The password hash never leaves the domain in responses.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

/// Validation errors returned by the user newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    #[error("enter a valid email address")]
    InvalidEmail,
    /// Email exceeded the storage limit.
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// Display name exceeded the storage limit.
    #[error("name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum stored email length (RFC 5321 path limit).
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Canonical form used for every email comparison: trimmed and lower-cased.
pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalised, syntactically valid email address. Acts as the login key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Test@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "test@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = normalize_email(raw.as_ref());
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalized.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Free-form display name. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a display name.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = display_name.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// PHC-formatted password hash.
///
/// `Debug` output is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a hasher or read from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for hashers and persistence adapters.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Account permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserFlags {
    /// Flags for a self-registered account.
    pub const fn regular() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Flags for an administrator created out of band.
    pub const fn superuser() -> Self {
        Self {
            is_active: true,
            is_staff: true,
            is_superuser: true,
        }
    }
}

impl Default for UserFlags {
    fn default() -> Self {
        Self::regular()
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is normalised and unique across the store.
/// - `password_hash` is never serialised; adapters build their own DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: DisplayName,
    password_hash: PasswordHash,
    flags: UserFlags,
    date_joined: DateTime<Utc>,
}

impl User {
    /// Build a fresh user with a random id, joined now.
    pub fn register(
        email: EmailAddress,
        name: DisplayName,
        password_hash: PasswordHash,
        flags: UserFlags,
    ) -> Self {
        Self::restore(UserParts {
            id: UserId::random(),
            email,
            name,
            password_hash,
            flags,
            date_joined: Utc::now(),
        })
    }

    /// Rebuild a user from stored components.
    pub fn restore(parts: UserParts) -> Self {
        let UserParts {
            id,
            email,
            name,
            password_hash,
            flags,
            date_joined,
        } = parts;
        Self {
            id,
            email,
            name,
            password_hash,
            flags,
            date_joined,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Permission flags.
    pub fn flags(&self) -> UserFlags {
        self.flags
    }

    pub fn is_active(&self) -> bool {
        self.flags.is_active
    }

    pub fn is_superuser(&self) -> bool {
        self.flags.is_superuser
    }

    /// Registration timestamp.
    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    /// Apply a profile change set, returning the updated user.
    pub fn with_changes(mut self, changes: ProfileChanges) -> Self {
        let ProfileChanges {
            name,
            password_hash,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(password_hash) = password_hash {
            self.password_hash = password_hash;
        }
        self
    }
}

/// Parameter object for [`User::restore`].
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: DisplayName,
    pub password_hash: PasswordHash,
    pub flags: UserFlags,
    pub date_joined: DateTime<Utc>,
}

/// Mutable profile fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<DisplayName>,
    pub password_hash: Option<PasswordHash>,
}

impl ProfileChanges {
    /// True when applying the change set would not alter anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password_hash.is_none()
    }
}
