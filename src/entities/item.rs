//! Item entity - Represents a priced item with an optional percentage discount.
//!
//! The effective price is never stored; it is derived from `original_price`,
//! `has_discount` and `discount_percentage` by [`Model::price`].

use crate::core::pricing;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display label, `"Item"` unless set
    pub name: String,
    /// Undiscounted listed price, always greater than zero
    pub original_price: f64,
    /// Whether `discount_percentage` applies to this item
    pub has_discount: bool,
    /// Whole percentage in `0..100` subtracted when discounting is active
    pub discount_percentage: i32,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item has many category links
    #[sea_orm(has_many = "super::categorizing::Entity")]
    Categorizings,
}

impl Related<super::categorizing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categorizings.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::categorizing::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::categorizing::Relation::Item.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Effective price of this item after any active discount.
    #[must_use]
    pub fn price(&self) -> f64 {
        pricing::effective_price(
            self.original_price,
            self.has_discount,
            self.discount_percentage,
        )
    }
}
