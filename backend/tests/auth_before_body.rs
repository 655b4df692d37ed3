//! Protected writes reject bad credentials before looking at the body.
//!
//! The authenticator here yields to the runtime before answering, so the
//! token lookup is still pending when the payload is available.

#[allow(dead_code)]
mod support;

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::Value;

use recipe_backend::domain::ports::TokenAuthenticator;
use recipe_backend::domain::{AuthToken, Error, INVALID_TOKEN_MESSAGE, User};
use recipe_backend::inbound::http::test_utils::test_app;
use recipe_backend::test_support::TestHarness;
use support::{INGREDIENTS, ME, auth, ingredient_uri};

const STALE_KEY: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";

struct YieldingRejector;

#[async_trait]
impl TokenAuthenticator for YieldingRejector {
    async fn authenticate(&self, _token: &AuthToken) -> Result<User, Error> {
        tokio::task::yield_now().await;
        Err(Error::unauthorized(INVALID_TOKEN_MESSAGE))
    }
}

fn rejecting_harness() -> TestHarness {
    let mut harness = TestHarness::new();
    harness.state.authenticator = Arc::new(YieldingRejector);
    harness
}

#[rstest]
#[case::create_as_text(TestRequest::post().uri(INGREDIENTS), "text/plain", "name=x")]
#[case::create_malformed(TestRequest::post().uri(INGREDIENTS), "application/json", "{\"name\":")]
#[case::rename_as_text(
    TestRequest::patch().uri(&ingredient_uri("7f1c2a9e-3f7b-4a55-9a59-0a1d2c3b4e5f")),
    "text/plain",
    "name=x"
)]
#[case::rename_malformed(
    TestRequest::patch().uri(&ingredient_uri("7f1c2a9e-3f7b-4a55-9a59-0a1d2c3b4e5f")),
    "application/json",
    "[1, 2"
)]
#[case::profile_as_text(TestRequest::patch().uri(ME), "text/plain", "name=x")]
#[case::profile_replace_malformed(TestRequest::put().uri(ME), "application/json", "{")]
#[actix_web::test]
async fn bad_token_wins_over_bad_body(
    #[case] request: TestRequest,
    #[case] content_type: &str,
    #[case] body: &'static str,
) {
    let app = test::init_service(test_app(rejecting_harness().state)).await;

    let res = test::call_service(
        &app,
        request
            .insert_header(auth(STALE_KEY))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Token")
    );
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn missing_header_wins_over_non_json_body() {
    let app = test::init_service(test_app(rejecting_harness().state)).await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri(INGREDIENTS)
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("name=x")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn authenticated_caller_still_gets_malformed_body_details() {
    let harness = TestHarness::new();
    let app = test::init_service(test_app(harness.state)).await;
    test::call_service(&app, support::register("body@test.com", "testpass123").to_request()).await;
    let token: Value = test::call_and_read_body_json(
        &app,
        support::login("body@test.com", "testpass123").to_request(),
    )
    .await;
    let token = token["token"].as_str().unwrap_or_default().to_owned();

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri(INGREDIENTS)
            .insert_header(auth(&token))
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("name=x")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_body");
}
