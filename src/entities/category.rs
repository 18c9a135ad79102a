//! Category entity - Labels that items can be filed under.
//!
//! Categories play no part in pricing; they are linked to items through
//! the `categorizings` join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the category (e.g., "Books", "Garden")
    pub name: String,
    /// When the category was created
    pub created_at: DateTime,
    /// When the category was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many item links
    #[sea_orm(has_many = "super::categorizing::Entity")]
    Categorizings,
}

impl Related<super::categorizing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorizings.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        super::categorizing::Relation::Item.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::categorizing::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
