use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, TransactionTrait,
};

use models::{category, product};

use crate::errors::ServiceError;

/// Store accessor for the `category` table.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<category::Model>, ServiceError>;
    async fn insert(&self, name: &str, description: &str) -> Result<category::Model, ServiceError>;
    async fn save(&self, model: category::Model) -> Result<category::Model, ServiceError>;
    /// Removes the categories and every product that references them.
    /// Returns the number of categories removed.
    async fn delete_many(&self, ids: &[i32]) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        category::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, name: &str, description: &str) -> Result<category::Model, ServiceError> {
        Ok(category::create(&self.db, name, description).await?)
    }

    async fn save(&self, model: category::Model) -> Result<category::Model, ServiceError> {
        model
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_many(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let txn = self.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        // Children first so the parent delete never trips the foreign key.
        product::Entity::delete_many()
            .filter(product::Column::CategoryId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let res = category::Entity::delete_many()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}
