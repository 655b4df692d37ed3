//! Request builders shared by the HTTP integration suites.

use actix_web::http::header;
use actix_web::test::TestRequest;
use serde_json::json;

pub const REGISTER: &str = "/api/v1/users";
pub const TOKEN: &str = "/api/v1/users/token";
pub const ME: &str = "/api/v1/users/me";
pub const INGREDIENTS: &str = "/api/v1/recipe/ingredients";

pub fn ingredient_uri(id: &str) -> String {
    format!("{INGREDIENTS}/{id}")
}

pub fn register(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri(REGISTER)
        .set_json(json!({"email": email, "password": password, "name": "Test Name"}))
}

pub fn login(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri(TOKEN)
        .set_json(json!({"email": email, "password": password}))
}

/// `Authorization: Token <token>` header pair.
pub fn auth(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Token {token}"))
}
