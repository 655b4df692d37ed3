//! Tests for the account service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenRepository, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, UserParts};

fn fake_hash(password: &str) -> PasswordHash {
    PasswordHash::from_phc(format!("$fake${password}"))
}

/// Hasher double that "hashes" by prefixing and verifies by comparison.
fn fake_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(fake_hash(password)));
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(hash == &fake_hash(password)));
    hasher
}

fn stored_user(password: &str, flags: UserFlags) -> User {
    User::restore(UserParts {
        id: UserId::random(),
        email: EmailAddress::new("test@test.com").expect("email"),
        name: DisplayName::new("Test Name").expect("name"),
        password_hash: fake_hash(password),
        flags,
        date_joined: Utc::now(),
    })
}

fn make_service(
    users: MockUserRepository,
    tokens: MockTokenRepository,
    hasher: MockPasswordHasher,
) -> AccountService {
    AccountService::new(Arc::new(users), Arc::new(tokens), Arc::new(hasher))
}

#[fixture]
fn registration() -> RegistrationRequest {
    RegistrationRequest {
        email: EmailAddress::new("Test@Test.com").expect("email"),
        password: Password::new("testpass123").expect("password"),
        name: DisplayName::new("Test Name").expect("name"),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password(registration: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|user| {
            user.password_hash().as_phc() != "testpass123"
                && user.email().as_ref() == "test@test.com"
                && !user.is_superuser()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let user = service.register(registration).await.expect("registered");

    assert_eq!(user.name().as_ref(), "Test Name");
    assert_eq!(user.password_hash(), &fake_hash("testpass123"));
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_reported_as_email_taken(registration: RegistrationRequest) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .return_once(|user| Err(UserPersistenceError::duplicate_email(user.email().as_ref())));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let error = service.register(registration).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["code"], "email_taken");
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_map_to_transport_codes(
    registration: RegistrationRequest,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users.expect_create().return_once(move |_| Err(failure));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let error = service.register(registration).await.expect_err("failure");
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn issue_token_replaces_stored_digest() {
    let user = stored_user("testpass123", UserFlags::regular());
    let user_id = *user.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email| email == "test@test.com")
        .return_once(move |_| Ok(Some(user)));
    let mut tokens = MockTokenRepository::new();
    tokens
        .expect_replace()
        .withf(move |id, digest| id == &user_id && digest.as_str().len() == 64)
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(users, tokens, fake_hasher());
    let credentials =
        LoginCredentials::try_from_parts("TEST@test.com", "testpass123").expect("credentials");
    let token = service.issue_token(&credentials).await.expect("token");
    assert_eq!(token.expose().len(), crate::domain::TOKEN_LENGTH);
}

#[tokio::test]
async fn unknown_email_still_hashes_and_fails_generically() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|password| Ok(fake_hash(password)));

    let service = make_service(users, MockTokenRepository::new(), hasher);
    let credentials =
        LoginCredentials::try_from_parts("nobody@test.com", "testpass123").expect("credentials");
    let error = service.issue_token(&credentials).await.expect_err("rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[case("wrongpass", UserFlags::regular())]
#[case(
    "testpass123",
    UserFlags { is_active: false, ..UserFlags::regular() }
)]
#[tokio::test]
async fn bad_password_or_inactive_account_is_rejected(
    #[case] attempted: &str,
    #[case] flags: UserFlags,
) {
    let user = stored_user("testpass123", flags);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let credentials =
        LoginCredentials::try_from_parts("test@test.com", attempted).expect("credentials");
    let error = service.issue_token(&credentials).await.expect_err("rejected");
    assert_eq!(error.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn authenticate_resolves_live_token() {
    let user = stored_user("testpass123", UserFlags::regular());
    let user_id = *user.id();
    let token = AuthToken::generate();
    let digest = token.digest();

    let mut tokens = MockTokenRepository::new();
    tokens
        .expect_find_user_id()
        .withf(move |candidate| candidate == &digest)
        .return_once(move |_| Ok(Some(user_id)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, tokens, MockPasswordHasher::new());
    let principal = service.authenticate(&token).await.expect("authenticated");
    assert_eq!(principal.id(), &user_id);
}

#[tokio::test]
async fn authenticate_rejects_unknown_token() {
    let mut tokens = MockTokenRepository::new();
    tokens.expect_find_user_id().return_once(|_| Ok(None));

    let service = make_service(MockUserRepository::new(), tokens, MockPasswordHasher::new());
    let error = service
        .authenticate(&AuthToken::generate())
        .await
        .expect_err("unknown");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn authenticate_rejects_inactive_user() {
    let user = stored_user(
        "testpass123",
        UserFlags {
            is_active: false,
            ..UserFlags::regular()
        },
    );
    let user_id = *user.id();
    let mut tokens = MockTokenRepository::new();
    tokens
        .expect_find_user_id()
        .return_once(move |_| Ok(Some(user_id)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, tokens, MockPasswordHasher::new());
    let error = service
        .authenticate(&AuthToken::generate())
        .await
        .expect_err("inactive");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn update_profile_rehashes_new_password() {
    let user = stored_user("testpass123", UserFlags::regular());
    let user_id = *user.id();
    let mut users = MockUserRepository::new();
    users
        .expect_update_profile()
        .withf(|_, changes| {
            changes.name == Some(DisplayName::new("new name").expect("name"))
                && changes.password_hash.as_ref() == Some(&fake_hash("newpassword123"))
        })
        .times(1)
        .return_once(move |_, changes| Ok(Some(user.with_changes(changes.clone()))));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let update = ProfileUpdate {
        name: Some(DisplayName::new("new name").expect("name")),
        password: Some(Password::new("newpassword123").expect("password")),
    };
    let updated = service
        .update_profile(&user_id, update)
        .await
        .expect("updated");
    assert_eq!(updated.name().as_ref(), "new name");
}

#[tokio::test]
async fn empty_profile_update_reads_current_user() {
    let user = stored_user("testpass123", UserFlags::regular());
    let user_id = *user.id();
    let mut users = MockUserRepository::new();
    users.expect_update_profile().never();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, MockTokenRepository::new(), MockPasswordHasher::new());
    let current = service
        .update_profile(&user_id, ProfileUpdate::default())
        .await
        .expect("current");
    assert_eq!(current.id(), &user_id);
}

#[tokio::test]
async fn create_superuser_sets_admin_flags() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|user| user.is_superuser() && user.flags().is_staff)
        .return_once(|_| Ok(()));

    let service = make_service(users, MockTokenRepository::new(), fake_hasher());
    let admin = service
        .create_superuser(
            EmailAddress::new("admin@test.com").expect("email"),
            Password::new("adminpass").expect("password"),
            DisplayName::default(),
        )
        .await
        .expect("created");
    assert!(admin.is_superuser());
}
