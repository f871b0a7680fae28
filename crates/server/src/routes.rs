use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::category::{CategoryService, SeaOrmCategoryRepository};
use service::product::{ProductService, SeaOrmProductRepository};

use crate::openapi::ApiDoc;

pub mod categories;
pub mod products;

pub type Categories = CategoryService<SeaOrmCategoryRepository>;
pub type Products = ProductService<SeaOrmProductRepository, SeaOrmCategoryRepository>;

/// Shared handler state: one service per entity over a single pool.
#[derive(Clone)]
pub struct ServerState {
    pub categories: Arc<Categories>,
    pub products: Arc<Products>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let category_repo = Arc::new(SeaOrmCategoryRepository { db: db.clone() });
        let product_repo = Arc::new(SeaOrmProductRepository { db });
        Self {
            categories: Arc::new(CategoryService::new(Arc::clone(&category_repo))),
            products: Arc::new(ProductService::new(product_repo, category_repo)),
        }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let categories = Router::new()
        .route(
            "/categories",
            get(categories::list)
                .post(categories::create)
                .put(categories::update)
                .delete(categories::delete_many),
        )
        .route("/categories/:id", get(categories::get).delete(categories::delete_by_id));

    let products = Router::new()
        .route(
            "/products",
            get(products::list)
                .post(products::create)
                .put(products::update)
                .delete(products::delete_many),
        )
        .route("/products/:id", get(products::get).delete(products::delete_by_id))
        .route("/products/category/:id", get(products::list_by_category));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(categories)
        .merge(products)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
