
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

pub async fn migrated_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
