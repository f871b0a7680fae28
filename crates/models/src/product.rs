use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{category, errors};

/// `idCategory` value meaning "no category".
pub const NO_CATEGORY: i32 = -1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Product as exposed over the API: the category is resolved instead of
/// carried as a raw foreign key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Option<category::Model>,
}

impl From<(Model, Option<category::Model>)> for ProductWithCategory {
    fn from((p, category): (Model, Option<category::Model>)) -> Self {
        Self { id: p.id, name: p.name, description: p.description, price: p.price, category }
    }
}

/// Maps the wire sentinel onto a nullable foreign key.
pub fn category_ref(id_category: i32) -> Option<i32> {
    if id_category == NO_CATEGORY { None } else { Some(id_category) }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name should not be empty".into())); }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
    price: f64,
    category_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        price: Set(price),
        category_id: Set(category_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Loads a product together with its category, if any.
pub async fn find_with_category(db: &DatabaseConnection, id: i32) -> Result<Option<ProductWithCategory>, errors::ModelError> {
    let row = Entity::find_by_id(id)
        .find_also_related(category::Entity)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(row.map(ProductWithCategory::from))
}
