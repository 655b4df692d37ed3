//! Explicit routing table.
//!
//! Each path is a `web::resource` listing the verbs it accepts. Any other
//! verb falls through to the resource default, which answers 405 before a
//! handler, and therefore before the auth gate, is ever reached.

use actix_web::{HttpResponse, Resource, web};

use crate::domain::Error;
use crate::inbound::http::error::{json_error_handler, method_not_allowed};
use crate::inbound::http::{admin, health, ingredients, users};

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// JSON extractor configuration shared by every endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}

/// App-level fallback for paths that match no resource.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found("resource not found"))
}

/// Register every route. Callers supply `web::Data<HttpState>` and
/// `web::Data<HealthState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api/v1")
                .service(resource("/users").route(web::post().to(users::register)))
                .service(
                    resource("/users/token")
                        .route(web::post().to(users::issue_token))
                        .route(web::delete().to(users::revoke_token)),
                )
                .service(
                    resource("/users/me")
                        .route(web::get().to(users::current_user))
                        .route(web::patch().to(users::update_current_user))
                        .route(web::put().to(users::update_current_user)),
                )
                .service(
                    resource("/recipe/ingredients")
                        .route(web::get().to(ingredients::list_ingredients))
                        .route(web::post().to(ingredients::create_ingredient)),
                )
                .service(
                    resource("/recipe/ingredients/{id}")
                        .route(web::get().to(ingredients::get_ingredient))
                        .route(web::patch().to(ingredients::rename_ingredient))
                        .route(web::delete().to(ingredients::delete_ingredient)),
                ),
        )
        .service(
            web::scope("/admin")
                .service(resource("/users").route(web::get().to(admin::list_users)))
                .service(resource("/users/add").route(web::get().to(admin::add_user)))
                .service(resource("/users/{id}").route(web::get().to(admin::user_detail))),
        )
        .service(resource("/health/ready").route(web::get().to(health::ready)))
        .service(resource("/health/live").route(web::get().to(health::live)));
}
