use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

use models::{category, product};

use crate::errors::ServiceError;

/// Store accessor for the `product` table, joined to `category` on reads.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<product::ProductWithCategory>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<product::ProductWithCategory>, ServiceError>;
    async fn list_by_category(&self, category_id: i32) -> Result<Vec<product::ProductWithCategory>, ServiceError>;
    async fn insert(
        &self,
        name: &str,
        description: &str,
        price: f64,
        category_id: Option<i32>,
    ) -> Result<product::Model, ServiceError>;
    async fn save(&self, model: product::Model) -> Result<product::Model, ServiceError>;
    async fn delete_many(&self, ids: &[i32]) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> Result<Vec<product::ProductWithCategory>, ServiceError> {
        let rows = product::Entity::find()
            .find_also_related(category::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(product::ProductWithCategory::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<product::ProductWithCategory>, ServiceError> {
        Ok(product::find_with_category(&self.db, id).await?)
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<product::ProductWithCategory>, ServiceError> {
        let rows = product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .find_also_related(category::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(product::ProductWithCategory::from).collect())
    }

    async fn insert(
        &self,
        name: &str,
        description: &str,
        price: f64,
        category_id: Option<i32>,
    ) -> Result<product::Model, ServiceError> {
        Ok(product::create(&self.db, name, description, price, category_id).await?)
    }

    async fn save(&self, model: product::Model) -> Result<product::Model, ServiceError> {
        model
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_many(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let res = product::Entity::delete_many()
            .filter(product::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}
