use std::sync::Arc;
use tracing::{info, instrument};

use models::product::{self, ProductWithCategory, NO_CATEGORY};

use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;
use crate::{supplied, DeleteOutcome};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// `NO_CATEGORY` creates the product uncategorized.
    pub id_category: i32,
}

/// Fields of a partial update. Empty strings and a zero price count as absent.
/// `id_category` of `NO_CATEGORY` detaches the product from its category.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub id_category: Option<i32>,
}

/// Application service encapsulating product business rules.
/// Category links are checked through the category accessor before writes;
/// the check and the write are separate statements.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self { Self { products, categories } }

    pub async fn list(&self) -> Result<Vec<ProductWithCategory>, ServiceError> {
        self.products.list().await
    }

    pub async fn get(&self, id: i32) -> Result<ProductWithCategory, ServiceError> {
        self.products.get(id).await?.ok_or_else(|| ServiceError::not_found("Product"))
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<ProductWithCategory>, ServiceError> {
        self.ensure_category(category_id).await?;
        self.products.list_by_category(category_id).await
    }

    #[instrument(skip(self, input), fields(id_category = input.id_category))]
    pub async fn create(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
        product::validate_name(&input.name)?;
        let category_id = product::category_ref(input.id_category);
        if let Some(id) = category_id {
            self.ensure_category(id).await?;
        }
        let created = self
            .products
            .insert(&input.name, &input.description, input.price, category_id)
            .await?;
        info!(id = created.id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: ProductChanges) -> Result<ProductWithCategory, ServiceError> {
        let current = self.get(id).await?;

        let mut category = current.category;
        match changes.id_category {
            Some(NO_CATEGORY) => category = None,
            Some(category_id) => category = Some(self.ensure_category(category_id).await?),
            None => {}
        }

        let mut row = product::Model {
            id: current.id,
            name: current.name,
            description: current.description,
            price: current.price,
            category_id: category.as_ref().map(|c| c.id),
        };
        if let Some(name) = supplied(changes.name.as_deref()) {
            row.name = name.to_string();
        }
        if let Some(description) = supplied(changes.description.as_deref()) {
            row.description = description.to_string();
        }
        if let Some(price) = changes.price.filter(|p| *p != 0.0) {
            row.price = price;
        }

        let saved = self.products.save(row).await?;
        info!(id = saved.id, category_id = ?saved.category_id, "product_updated");
        Ok(ProductWithCategory::from((saved, category)))
    }

    pub async fn delete(&self, ids: &[i32]) -> Result<DeleteOutcome, ServiceError> {
        if ids.is_empty() {
            return Ok(DeleteOutcome::Missing);
        }
        let affected = self.products.delete_many(ids).await?;
        info!(requested = ids.len(), affected, "products_deleted");
        Ok(DeleteOutcome::from_affected(affected))
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<DeleteOutcome, ServiceError> {
        self.delete(&[id]).await
    }

    async fn ensure_category(&self, id: i32) -> Result<models::category::Model, ServiceError> {
        self.categories.get(id).await?.ok_or_else(|| ServiceError::not_found("Category"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::services;

    fn pen(id_category: i32) -> NewProduct {
        NewProduct { name: "Pen".into(), description: "blue ink".into(), price: 2.5, id_category }
    }

    #[tokio::test]
    async fn create_links_existing_category() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        let p = products.create(pen(c.id)).await?;

        let found = products.get(p.id).await?;
        assert_eq!(found.name, "Pen");
        assert_eq!(found.description, "blue ink");
        assert_eq!(found.price, 2.5);
        assert_eq!(found.category.map(|c| c.id), Some(c.id));
        Ok(())
    }

    #[tokio::test]
    async fn create_with_sentinel_is_uncategorized() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        let loose = products.create(pen(NO_CATEGORY)).await?;
        assert_eq!(loose.category_id, None);

        let in_category = products.list_by_category(c.id).await?;
        assert!(in_category.iter().all(|p| p.id != loose.id));
        assert!(products.get(loose.id).await?.category.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_category_inserts_nothing() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let err = products.create(pen(41)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Category not exist"));
        assert!(products.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_is_not_found() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let err = products.get(3).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not exist"));
        Ok(())
    }

    #[tokio::test]
    async fn list_by_unknown_category_is_not_found() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        assert!(matches!(products.list_by_category(8).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_includes_resolved_categories() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        products.create(pen(c.id)).await?;
        products.create(pen(NO_CATEGORY)).await?;

        let all = products.list().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category.as_ref().map(|c| c.name.as_str()), Some("Office"));
        assert!(all[1].category.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_patches_and_relinks() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let first = categories.create("Office", "supplies").await?;
        let second = categories.create("School", "stationery").await?;
        let p = products.create(pen(first.id)).await?;

        let updated = products
            .update(p.id, ProductChanges { price: Some(3.0), id_category: Some(second.id), ..Default::default() })
            .await?;
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.description, "blue ink");
        assert_eq!(updated.price, 3.0);
        assert_eq!(updated.category.as_ref().map(|c| c.id), Some(second.id));
        assert_eq!(products.get(p.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_ignores_empty_and_zero_values() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let p = products.create(pen(NO_CATEGORY)).await?;
        let updated = products
            .update(
                p.id,
                ProductChanges { name: Some(String::new()), price: Some(0.0), ..Default::default() },
            )
            .await?;
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.price, 2.5);
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_name_when_given_whitespace() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let p = products.create(pen(NO_CATEGORY)).await?;
        let updated = products
            .update(p.id, ProductChanges { name: Some("  ".into()), ..Default::default() })
            .await?;
        assert_eq!(updated.name, "Pen");
        assert_eq!(products.get(p.id).await?.name, "Pen");
        Ok(())
    }

    #[tokio::test]
    async fn update_with_sentinel_detaches_category() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        let p = products.create(pen(c.id)).await?;
        let updated = products
            .update(p.id, ProductChanges { id_category: Some(NO_CATEGORY), ..Default::default() })
            .await?;
        assert!(updated.category.is_none());
        assert!(products.list_by_category(c.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_unknown_category_and_keeps_row() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        let p = products.create(pen(c.id)).await?;
        let err = products
            .update(p.id, ProductChanges { name: Some("Quill".into()), id_category: Some(77), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(products.get(p.id).await?.name, "Pen");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let err = products.update(10, ProductChanges::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not exist"));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_category_cascades_to_products() -> Result<(), anyhow::Error> {
        let (categories, products) = services().await?;
        let c = categories.create("Office", "supplies").await?;
        let keep = categories.create("Kitchen", "tools").await?;
        let a = products.create(pen(c.id)).await?;
        let b = products.create(pen(c.id)).await?;
        let other = products.create(pen(keep.id)).await?;
        let loose = products.create(pen(NO_CATEGORY)).await?;

        assert_eq!(categories.delete_by_id(c.id).await?, DeleteOutcome::Deleted(1));
        for id in [a.id, b.id] {
            assert!(matches!(products.get(id).await, Err(ServiceError::NotFound(_))));
        }
        assert!(products.get(other.id).await.is_ok());
        assert!(products.get(loose.id).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn delete_products_soft_miss_and_hit() -> Result<(), anyhow::Error> {
        let (_, products) = services().await?;
        let a = products.create(pen(NO_CATEGORY)).await?;
        let b = products.create(pen(NO_CATEGORY)).await?;
        assert_eq!(products.delete(&[a.id, b.id]).await?, DeleteOutcome::Deleted(2));
        assert_eq!(products.delete_by_id(a.id).await?, DeleteOutcome::Missing);
        Ok(())
    }
}
