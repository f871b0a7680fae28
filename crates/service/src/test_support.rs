#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, DatabaseConfig};

use crate::category::{CategoryService, SeaOrmCategoryRepository};
use crate::product::{ProductService, SeaOrmProductRepository};

/// Fresh, migrated in-memory database per call.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub type Categories = CategoryService<SeaOrmCategoryRepository>;
pub type Products = ProductService<SeaOrmProductRepository, SeaOrmCategoryRepository>;

/// Both services sharing one database, as the server wires them.
pub async fn services() -> Result<(Categories, Products), anyhow::Error> {
    let db = get_db().await?;
    let categories = Arc::new(SeaOrmCategoryRepository { db: db.clone() });
    let products = Arc::new(SeaOrmProductRepository { db });
    Ok((
        CategoryService::new(Arc::clone(&categories)),
        ProductService::new(products, categories),
    ))
}
