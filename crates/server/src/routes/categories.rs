use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}};
use common::{response::ApiResponse, types::IdBody};
use service::DeleteOutcome;
use tracing::info;

use crate::dto::{DeleteIds, IdPath, NewCategory, UpdateCategory, ValidJson};
use crate::errors::failure;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    responses(
        (status = 200, description = "All categories"),
        (status = 500, description = "Error getting all categories")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Response {
    match state.categories.list().await {
        Ok(list) => { info!(count = list.len(), "list categories"); ApiResponse::ok(list).into_response() }
        Err(e) => failure(e, "Error getting all categories"),
    }
}

/// A missing category answers with `data: null`, not an error.
#[utoipa::path(
    get, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category, or null data when absent"),
        (status = 500, description = "Error getting category")
    )
)]
pub async fn get(State(state): State<ServerState>, IdPath(id): IdPath) -> Response {
    match state.categories.get(id).await {
        Ok(found) => ApiResponse::ok(found).into_response(),
        Err(e) => failure(e, "Error getting category"),
    }
}

#[utoipa::path(
    post, path = "/categories", tag = "categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Created; data holds the new id"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Error creating category")
    )
)]
pub async fn create(State(state): State<ServerState>, ValidJson(input): ValidJson<NewCategory>) -> Response {
    match state.categories.create(&input.name, &input.description).await {
        Ok(c) => (StatusCode::CREATED, ApiResponse::ok(IdBody { id: c.id })).into_response(),
        Err(e) => failure(e, "Error creating category"),
    }
}

#[utoipa::path(
    put, path = "/categories", tag = "categories",
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Updated category"),
        (status = 404, description = "Category not exist"),
        (status = 500, description = "Error updating category")
    )
)]
pub async fn update(State(state): State<ServerState>, ValidJson(input): ValidJson<UpdateCategory>) -> Response {
    let (id, changes) = input.into_parts();
    match state.categories.update(id, changes).await {
        Ok(c) => ApiResponse::ok(c).into_response(),
        Err(e) => failure(e, "Error updating category"),
    }
}

#[utoipa::path(
    delete, path = "/categories", tag = "categories",
    request_body = DeleteIds,
    responses(
        (status = 200, description = "Deleted ids, or an empty list with a note when none matched"),
        (status = 500, description = "Error deleting categories")
    )
)]
pub async fn delete_many(State(state): State<ServerState>, ValidJson(input): ValidJson<DeleteIds>) -> Response {
    match state.categories.delete(&input.id).await {
        Ok(DeleteOutcome::Deleted(_)) => ApiResponse::ok(IdBody { id: input.id }).into_response(),
        Ok(DeleteOutcome::Missing) => ApiResponse::soft_miss("Categories not found").into_response(),
        Err(e) => failure(e, "Error deleting categories"),
    }
}

#[utoipa::path(
    delete, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted id, or an empty list with a note when absent"),
        (status = 500, description = "Error deleting category")
    )
)]
pub async fn delete_by_id(State(state): State<ServerState>, IdPath(id): IdPath) -> Response {
    match state.categories.delete_by_id(id).await {
        Ok(DeleteOutcome::Deleted(_)) => ApiResponse::ok(IdBody { id }).into_response(),
        Ok(DeleteOutcome::Missing) => ApiResponse::soft_miss("Category not found").into_response(),
        Err(e) => failure(e, "Error deleting category"),
    }
}
