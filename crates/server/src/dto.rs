//! Request bodies and the extractors that validate them before any
//! service is called.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use common::response::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use models::product::NO_CATEGORY;
use service::category::CategoryChanges;
use service::product::{NewProduct as NewProductInput, ProductChanges};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewCategory {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn into_parts(self) -> (i32, CategoryChanges) {
        (self.id, CategoryChanges { name: self.name, description: self.description })
    }
}

/// Batch delete body: `{ "id": [1, 2, 3] }`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteIds {
    #[validate(length(min = 1, message = "id should not be empty"))]
    pub id: Vec<i32>,
}

fn no_category() -> i32 { NO_CATEGORY }

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    /// `-1` creates the product without a category.
    #[serde(rename = "idCategory", default = "no_category")]
    pub id_category: i32,
}

impl From<NewProduct> for NewProductInput {
    fn from(p: NewProduct) -> Self {
        Self { name: p.name, description: p.description, price: p.price, id_category: p.id_category }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// `-1` detaches the product from its category.
    #[serde(rename = "idCategory")]
    pub id_category: Option<i32>,
}

impl UpdateProduct {
    pub fn into_parts(self) -> (i32, ProductChanges) {
        (
            self.id,
            ProductChanges {
                name: self.name,
                description: self.description,
                price: self.price,
                id_category: self.id_category,
            },
        )
    }
}

/// JSON body that has been deserialized and validated. Rejections are
/// answered with a 400 envelope.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiResponse<Value>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiResponse::error(e.body_text(), StatusCode::BAD_REQUEST))?;
        value
            .validate()
            .map_err(|e| ApiResponse::error(format!("Validation failed: {}", e), StatusCode::BAD_REQUEST))?;
        Ok(Self(value))
    }
}

/// Integer `:id` path segment.
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiResponse<Value>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiResponse::error(e.body_text(), StatusCode::BAD_REQUEST))?;
        Ok(Self(id))
    }
}
