//! Ingredient API handlers.
//!
//! ```text
//! GET    /api/v1/recipe/ingredients
//! POST   /api/v1/recipe/ingredients       {"name":"Kale"}
//! GET    /api/v1/recipe/ingredients/{id}
//! PATCH  /api/v1/recipe/ingredients/{id}  {"name":"Chard"}
//! DELETE /api/v1/recipe/ingredients/{id}
//! ```
//!
//! Every handler scopes its work to the authenticated principal. An
//! ingredient owned by someone else answers 404, like a missing one.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Ingredient};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, AuthenticatedJson};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_ingredient_id, parse_ingredient_name};

/// Create/rename payload. Fields such as `user` or `owner` are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct IngredientRequest {
    #[schema(example = "Kale")]
    pub name: Option<String>,
}

/// Ingredient as returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub id: Uuid,
    #[schema(example = "Kale")]
    pub name: String,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: *ingredient.id().as_uuid(),
            name: ingredient.name().as_ref().to_owned(),
        }
    }
}

/// List the caller's ingredients, name descending.
#[utoipa::path(
    get,
    path = "/api/v1/recipe/ingredients",
    responses(
        (status = 200, description = "Ingredients", body = [IngredientResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients",
    security(("token" = []))
)]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    principal: Authenticated,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let ingredients = state
        .ingredients
        .list_ingredients(principal.user().id())
        .await?;
    Ok(web::Json(
        ingredients.iter().map(IngredientResponse::from).collect(),
    ))
}

/// Create an ingredient owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipe/ingredients",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient",
    security(("token" = []))
)]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    request: AuthenticatedJson<IngredientRequest>,
) -> ApiResult<HttpResponse> {
    let (principal, payload) = request.into_parts();
    let name = parse_ingredient_name(payload.name)?;
    let ingredient = state
        .ingredients_command
        .create_ingredient(principal.id(), name)
        .await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(&ingredient)))
}

/// Fetch one of the caller's ingredients.
#[utoipa::path(
    get,
    path = "/api/v1/recipe/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient",
    security(("token" = []))
)]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    principal: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let id = parse_ingredient_id(&path.into_inner())?;
    let ingredient = state
        .ingredients
        .fetch_ingredient(principal.user().id(), &id)
        .await?;
    Ok(web::Json(IngredientResponse::from(&ingredient)))
}

/// Rename one of the caller's ingredients.
#[utoipa::path(
    patch,
    path = "/api/v1/recipe/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Updated ingredient", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "renameIngredient",
    security(("token" = []))
)]
pub async fn rename_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    request: AuthenticatedJson<IngredientRequest>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let (principal, payload) = request.into_parts();
    let id = parse_ingredient_id(&path.into_inner())?;
    let name = parse_ingredient_name(payload.name)?;
    let ingredient = state
        .ingredients_command
        .rename_ingredient(principal.id(), &id, name)
        .await?;
    Ok(web::Json(IngredientResponse::from(&ingredient)))
}

/// Delete one of the caller's ingredients.
#[utoipa::path(
    delete,
    path = "/api/v1/recipe/ingredients/{id}",
    params(("id" = Uuid, Path, description = "Ingredient identifier")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient",
    security(("token" = []))
)]
pub async fn delete_ingredient(
    state: web::Data<HttpState>,
    principal: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_ingredient_id(&path.into_inner())?;
    state
        .ingredients_command
        .delete_ingredient(principal.user().id(), &id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
