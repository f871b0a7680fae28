use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}};
use common::{response::ApiResponse, types::IdBody};
use service::DeleteOutcome;
use tracing::info;

use crate::dto::{DeleteIds, IdPath, NewProduct, UpdateProduct, ValidJson};
use crate::errors::failure;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products with their category"),
        (status = 500, description = "Error getting all products")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Response {
    match state.products.list().await {
        Ok(list) => { info!(count = list.len(), "list products"); ApiResponse::ok(list).into_response() }
        Err(e) => failure(e, "Error getting all products"),
    }
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its category"),
        (status = 404, description = "Product not exist"),
        (status = 500, description = "Error getting product")
    )
)]
pub async fn get(State(state): State<ServerState>, IdPath(id): IdPath) -> Response {
    match state.products.get(id).await {
        Ok(p) => ApiResponse::ok(p).into_response(),
        Err(e) => failure(e, "Error getting product"),
    }
}

#[utoipa::path(
    get, path = "/products/category/{id}", tag = "products",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products of the category"),
        (status = 404, description = "Category not exist"),
        (status = 500, description = "Error getting all products")
    )
)]
pub async fn list_by_category(State(state): State<ServerState>, IdPath(id): IdPath) -> Response {
    match state.products.list_by_category(id).await {
        Ok(list) => { info!(category_id = id, count = list.len(), "list products of category"); ApiResponse::ok(list).into_response() }
        Err(e) => failure(e, "Error getting all products"),
    }
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created; data holds the new id"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Category not exist"),
        (status = 500, description = "Error creating product")
    )
)]
pub async fn create(State(state): State<ServerState>, ValidJson(input): ValidJson<NewProduct>) -> Response {
    match state.products.create(input.into()).await {
        Ok(p) => (StatusCode::CREATED, ApiResponse::ok(IdBody { id: p.id })).into_response(),
        Err(e) => failure(e, "Error creating product"),
    }
}

#[utoipa::path(
    put, path = "/products", tag = "products",
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Updated product with its category"),
        (status = 404, description = "Product or category not exist"),
        (status = 500, description = "Error updating product")
    )
)]
pub async fn update(State(state): State<ServerState>, ValidJson(input): ValidJson<UpdateProduct>) -> Response {
    let (id, changes) = input.into_parts();
    match state.products.update(id, changes).await {
        Ok(p) => ApiResponse::ok(p).into_response(),
        Err(e) => failure(e, "Error updating product"),
    }
}

#[utoipa::path(
    delete, path = "/products", tag = "products",
    request_body = DeleteIds,
    responses(
        (status = 200, description = "Deleted ids, or an empty list with a note when none matched"),
        (status = 500, description = "Error deleting products")
    )
)]
pub async fn delete_many(State(state): State<ServerState>, ValidJson(input): ValidJson<DeleteIds>) -> Response {
    match state.products.delete(&input.id).await {
        Ok(DeleteOutcome::Deleted(_)) => ApiResponse::ok(IdBody { id: input.id }).into_response(),
        Ok(DeleteOutcome::Missing) => ApiResponse::soft_miss("Products not found").into_response(),
        Err(e) => failure(e, "Error deleting products"),
    }
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted id, or an empty list with a note when absent"),
        (status = 500, description = "Error deleting product")
    )
)]
pub async fn delete_by_id(State(state): State<ServerState>, IdPath(id): IdPath) -> Response {
    match state.products.delete_by_id(id).await {
        Ok(DeleteOutcome::Deleted(_)) => ApiResponse::ok(IdBody { id }).into_response(),
        Ok(DeleteOutcome::Missing) => ApiResponse::soft_miss("Products not found").into_response(),
        Err(e) => failure(e, "Error deleting product"),
    }
}
