use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{errors, product};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Both fields are required on create.
pub fn validate_new(name: &str, description: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name should not be empty".into())); }
    if description.trim().is_empty() { return Err(errors::ModelError::Validation("description should not be empty".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, description: &str) -> Result<Model, errors::ModelError> {
    validate_new(name, description)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
