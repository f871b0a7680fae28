use utoipa::OpenApi;

use crate::dto::{DeleteIds, NewCategory, NewProduct, UpdateCategory, UpdateProduct};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete_many,
        crate::routes::categories::delete_by_id,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::list_by_category,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete_many,
        crate::routes::products::delete_by_id,
    ),
    components(
        schemas(
            NewCategory,
            UpdateCategory,
            DeleteIds,
            NewProduct,
            UpdateProduct,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories", description = "Category CRUD"),
        (name = "products", description = "Product CRUD and category lookups")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/categories", "/categories/{id}", "/products", "/products/{id}", "/products/category/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
