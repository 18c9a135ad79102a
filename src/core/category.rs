//! Category business logic - Creating categories and linking them to items.
//!
//! Categories never influence pricing.

use crate::{
    entities::{Categorizing, Category, Item, categorizing, category},
    errors::{Error, Result},
};
use sea_orm::{
    JoinType, PaginatorTrait, QueryOrder, QuerySelect, RelationTrait, Set, prelude::*,
};
use tracing::{info, instrument};

/// Creates a new category.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only, or if the insert fails.
#[instrument(skip(db))]
pub async fn create_category(db: &DatabaseConnection, name: String) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let active = category::ActiveModel {
        name: Set(name.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    active.insert(db).await.map_err(Into::into)
}

/// Links an item to a category.
///
/// # Errors
/// Returns `Error::ItemNotFound` or `Error::CategoryNotFound` when either side is missing.
#[instrument(skip(db))]
pub async fn categorize_item(
    db: &DatabaseConnection,
    item_id: i64,
    category_id: i64,
) -> Result<categorizing::Model> {
    if Item::find_by_id(item_id).one(db).await?.is_none() {
        return Err(Error::ItemNotFound { id: item_id });
    }
    if Category::find_by_id(category_id).one(db).await?.is_none() {
        return Err(Error::CategoryNotFound { id: category_id });
    }

    let now = chrono::Utc::now().naive_utc();
    let link = categorizing::ActiveModel {
        item_id: Set(item_id),
        category_id: Set(category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Filed item {} under category {}", item_id, category_id);
    Ok(link)
}

/// Categories linked to an item, ordered by name.
pub async fn categories_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .join(JoinType::InnerJoin, category::Relation::Categorizings.def())
        .filter(categorizing::Column::ItemId.eq(item_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of items filed under a category.
pub async fn item_count_for_category(db: &DatabaseConnection, category_id: i64) -> Result<u64> {
    Categorizing::find()
        .filter(categorizing::Column::CategoryId.eq(category_id))
        .count(db)
        .await
        .map_err(Into::into)
}
