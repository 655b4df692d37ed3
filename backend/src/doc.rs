//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every JSON endpoint from the inbound layer, the
//! request/response schemas and the `Token` authorization scheme. Admin HTML
//! pages are not part of the document.
//!
//! The generated specification is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ingredients::{IngredientRequest, IngredientResponse};
use crate::inbound::http::users::{
    RegisterRequest, TokenRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};

/// Enrich the generated document with the token header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <token>` as issued by POST /api/v1/users/token.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe backend API",
        description = "Account registration, token login and per-user ingredient management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("token" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::issue_token,
        crate::inbound::http::users::revoke_token,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::ingredients::rename_ingredient,
        crate::inbound::http::ingredients::delete_ingredient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        TokenRequest,
        TokenResponse,
        UpdateProfileRequest,
        UserResponse,
        IngredientRequest,
        IngredientResponse,
    )),
    tags(
        (name = "users", description = "Registration, login and profile"),
        (name = "ingredients", description = "Ingredients owned by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
