//! Ingredient CRUD and per-owner isolation over the HTTP surface.

#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use recipe_backend::inbound::http::ingredients::IngredientResponse;
use recipe_backend::inbound::http::test_utils::test_app;
use recipe_backend::inbound::http::users::TokenResponse;
use recipe_backend::test_support::TestHarness;
use support::{INGREDIENTS, auth, ingredient_uri, login, register};

/// Register and log in, returning the issued token.
macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        test::call_service($app, register($email, "testpass123").to_request()).await;
        let issued: TokenResponse =
            test::call_and_read_body_json($app, login($email, "testpass123").to_request()).await;
        issued.token
    }};
}

macro_rules! create {
    ($app:expr, $token:expr, $body:expr) => {{
        let res = test::call_service(
            $app,
            TestRequest::post()
                .uri(INGREDIENTS)
                .insert_header(auth($token))
                .set_json($body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: IngredientResponse = test::read_body_json(res).await;
        created
    }};
}

#[actix_web::test]
async fn listing_is_owner_scoped_and_name_descending() {
    let app = test::init_service(test_app(TestHarness::new().state)).await;
    let alice = sign_in!(&app, "alice@test.com");
    let bob = sign_in!(&app, "bob@test.com");

    create!(&app, &alice, json!({"name": "Dessert"}));
    create!(&app, &alice, json!({"name": "Vegan"}));
    create!(&app, &bob, json!({"name": "Fruity"}));

    let listed: Vec<IngredientResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(INGREDIENTS)
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    let names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Vegan", "Dessert"]);
}

#[actix_web::test]
async fn client_supplied_owner_is_ignored() {
    let app = test::init_service(test_app(TestHarness::new().state)).await;
    let alice = sign_in!(&app, "alice@test.com");
    let bob = sign_in!(&app, "bob@test.com");

    let created = create!(
        &app,
        &bob,
        json!({"name": "Kale", "user": "alice@test.com", "owner": 1})
    );

    let alice_list: Vec<IngredientResponse> = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(INGREDIENTS)
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    assert!(alice_list.is_empty());

    let fetched: IngredientResponse = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&ingredient_uri(&created.id.to_string()))
            .insert_header(auth(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.name, "Kale");
}

#[actix_web::test]
async fn foreign_ingredients_look_missing() {
    let app = test::init_service(test_app(TestHarness::new().state)).await;
    let alice = sign_in!(&app, "alice@test.com");
    let mallory = sign_in!(&app, "mallory@test.com");
    let created = create!(&app, &alice, json!({"name": "Salt"}));
    let uri = ingredient_uri(&created.id.to_string());

    for req in [
        TestRequest::get(),
        TestRequest::patch().set_json(json!({"name": "Stolen"})),
        TestRequest::delete(),
    ] {
        let res = test::call_service(
            &app,
            req.uri(&uri).insert_header(auth(&mallory)).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let still_there: IngredientResponse = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&uri)
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(still_there.name, "Salt");
}

#[actix_web::test]
async fn rename_then_delete() {
    let app = test::init_service(test_app(TestHarness::new().state)).await;
    let alice = sign_in!(&app, "alice@test.com");
    let created = create!(&app, &alice, json!({"name": "Salt"}));
    let uri = ingredient_uri(&created.id.to_string());

    let renamed: IngredientResponse = test::call_and_read_body_json(
        &app,
        TestRequest::patch()
            .uri(&uri)
            .insert_header(auth(&alice))
            .set_json(json!({"name": "  Sea salt "}))
            .to_request(),
    )
    .await;
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.name, "Sea salt");

    let res = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&uri)
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri(&uri)
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_names_and_ids_are_rejected() {
    let app = test::init_service(test_app(TestHarness::new().state)).await;
    let alice = sign_in!(&app, "alice@test.com");

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri(INGREDIENTS)
            .insert_header(auth(&alice))
            .set_json(json!({"name": "   "}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "name");

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri(&ingredient_uri("42"))
            .insert_header(auth(&alice))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}
