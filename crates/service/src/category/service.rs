use std::sync::Arc;
use tracing::{info, instrument};

use models::category;

use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;
use crate::{supplied, DeleteOutcome};

/// Fields of a partial update; `None` or empty leaves the stored value.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Application service encapsulating category business rules.
pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Absence is not an error here; callers get `None`.
    pub async fn get(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, description))]
    pub async fn create(&self, name: &str, description: &str) -> Result<category::Model, ServiceError> {
        category::validate_new(name, description)?;
        let created = self.repo.insert(name, description).await?;
        info!(id = created.id, "category_created");
        Ok(created)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: CategoryChanges) -> Result<category::Model, ServiceError> {
        let mut current = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Category"))?;
        if let Some(name) = supplied(changes.name.as_deref()) {
            current.name = name.to_string();
        }
        if let Some(description) = supplied(changes.description.as_deref()) {
            current.description = description.to_string();
        }
        let saved = self.repo.save(current).await?;
        info!(id = saved.id, "category_updated");
        Ok(saved)
    }

    /// Deletes the categories and, transitively, their products.
    pub async fn delete(&self, ids: &[i32]) -> Result<DeleteOutcome, ServiceError> {
        if ids.is_empty() {
            return Ok(DeleteOutcome::Missing);
        }
        let affected = self.repo.delete_many(ids).await?;
        info!(requested = ids.len(), affected, "categories_deleted");
        Ok(DeleteOutcome::from_affected(affected))
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<DeleteOutcome, ServiceError> {
        self.delete(&[id]).await
    }
}
