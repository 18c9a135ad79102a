//! Item business logic - Handles the item lifecycle.
//!
//! Items are only written from a [`ValidatedItem`], so every row in the `items` table
//! satisfies the pricing invariants. Deleting an item removes its category links in
//! the same database transaction.

use crate::{
    core::validation::{ItemDraft, ValidatedItem},
    entities::{Categorizing, Item, categorizing, item},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Partial changes to an existing item. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    /// New display name
    pub name: Option<String>,
    /// New undiscounted price
    pub original_price: Option<f64>,
    /// New discount flag
    pub has_discount: Option<bool>,
    /// New discount percentage; fractional values are rejected by validation
    pub discount_percentage: Option<f64>,
}

impl ItemChanges {
    /// Overlays these changes on a stored item, producing a draft to validate.
    fn apply_to(self, current: &item::Model) -> ItemDraft {
        ItemDraft {
            name: Some(self.name.unwrap_or_else(|| current.name.clone())),
            original_price: Some(self.original_price.unwrap_or(current.original_price)),
            has_discount: Some(self.has_discount.unwrap_or(current.has_discount)),
            discount_percentage: Some(
                self.discount_percentage
                    .unwrap_or_else(|| f64::from(current.discount_percentage)),
            ),
        }
    }
}

/// Retrieves every item, ordered by ID.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an item by its unique ID.
pub async fn get_item_by_id(db: &DatabaseConnection, item_id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(item_id).one(db).await.map_err(Into::into)
}

/// Persists a validated item, stamping both timestamps with the current time.
///
/// Accepts any connection, so callers can batch several inserts in one transaction.
#[instrument(skip(db, new_item), fields(name = new_item.name()))]
pub async fn create_item<C>(db: &C, new_item: ValidatedItem) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().naive_utc();

    let active = item::ActiveModel {
        name: Set(new_item.name().to_string()),
        original_price: Set(new_item.original_price()),
        has_discount: Set(new_item.has_discount()),
        discount_percentage: Set(new_item.discount_percentage()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = active.insert(db).await?;
    info!(
        "Created item '{}' (ID: {}) at {} with discount {}%",
        created.name,
        created.id,
        created.original_price,
        if created.has_discount {
            created.discount_percentage
        } else {
            0
        }
    );
    Ok(created)
}

/// Validates raw input and creates the item in one step.
///
/// # Errors
/// Returns `Error::Validation` without touching the database if any rule fails.
pub async fn create_item_from_draft(
    db: &DatabaseConnection,
    draft: ItemDraft,
) -> Result<item::Model> {
    let validated = draft.validate()?;
    create_item(db, validated).await
}

/// Applies `changes` to an existing item after re-validating the merged result.
///
/// # Errors
/// Returns `Error::ItemNotFound` if the item does not exist, or `Error::Validation`
/// if the merged item breaks a rule; in both cases nothing is written.
#[instrument(skip(db))]
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    changes: ItemChanges,
) -> Result<item::Model> {
    let current = Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let validated = changes.apply_to(&current).validate()?;

    let mut active: item::ActiveModel = current.into();
    active.name = Set(validated.name().to_string());
    active.original_price = Set(validated.original_price());
    active.has_discount = Set(validated.has_discount());
    active.discount_percentage = Set(validated.discount_percentage());
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db).await?;
    debug!("Updated item {} -> effective price {}", updated.id, updated.price());
    Ok(updated)
}

/// Deletes an item together with its category links. Categories are kept.
///
/// # Errors
/// Returns `Error::ItemNotFound` if the item does not exist.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let links = Categorizing::delete_many()
        .filter(categorizing::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;
    let deleted = Item::delete_by_id(item_id).exec(&txn).await?;

    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(Error::ItemNotFound { id: item_id });
    }

    txn.commit().await?;
    info!(
        "Deleted item {} and {} category link(s)",
        item_id, links.rows_affected
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::category;
    use crate::entities::Category;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, PaginatorTrait};

    #[tokio::test]
    async fn test_create_item_from_draft_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_item_from_draft(&db, ItemDraft::priced(0.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));

        let result = create_item_from_draft(&db, ItemDraft::discounted(10.0, 100)).await;
        match result.unwrap_err() {
            Error::Validation(errors) => assert!(errors.has_field("discount_percentage")),
            other => panic!("expected validation error, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_item_integration() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let created = create_test_item(&db, 100.0).await?;
        assert!(created.id > 0);
        assert_eq!(created.name, "Item");
        assert_eq!(created.original_price, 100.0);
        assert!(!created.has_discount);
        assert_eq!(created.discount_percentage, 0);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.price(), 100.0);

        let fetched = get_item_by_id(&db, created.id).await?.unwrap();
        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_discounted_item_price_after_reload() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_discounted_item(&db, 100.0, 20).await?;
        let fetched = get_item_by_id(&db, created.id).await?.unwrap();
        assert_eq!(fetched.price(), 80.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_ordered_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_items(&db).await?.is_empty());

        let first = create_test_item(&db, 5.0).await?;
        let second = create_discounted_item(&db, 7.0, 10).await?;

        let items = list_items(&db).await?;
        assert_eq!(items, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_merges_and_revalidates() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_item(&db, 50.0).await?;

        let updated = update_item(
            &db,
            created.id,
            ItemChanges {
                has_discount: Some(true),
                discount_percentage: Some(10.0),
                ..ItemChanges::default()
            },
        )
        .await?;
        assert_eq!(updated.original_price, 50.0);
        assert!(updated.has_discount);
        assert_eq!(updated.price(), 45.0);
        assert!(updated.updated_at >= created.updated_at);

        // A change that breaks a rule leaves the row untouched
        let result = update_item(
            &db,
            created.id,
            ItemChanges {
                original_price: Some(0.0),
                ..ItemChanges::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));
        let stored = get_item_by_id(&db, created.id).await?.unwrap();
        assert_eq!(stored.original_price, 50.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_item(&db, 999, ItemChanges::default()).await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { id: 999 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_cascades_links_but_keeps_categories() -> Result<()> {
        let db = setup_test_db().await?;
        let doomed = create_test_item(&db, 10.0).await?;
        let survivor = create_test_item(&db, 20.0).await?;
        let books = category::create_category(&db, "Books".to_string()).await?;

        category::categorize_item(&db, doomed.id, books.id).await?;
        category::categorize_item(&db, survivor.id, books.id).await?;

        delete_item(&db, doomed.id).await?;

        assert!(get_item_by_id(&db, doomed.id).await?.is_none());
        assert_eq!(Categorizing::find().count(&db).await?, 1);
        assert_eq!(Category::find().count(&db).await?, 1);
        let remaining = category::categories_for_item(&db, survivor.id).await?;
        assert_eq!(remaining, vec![books]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_item(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { id: 42 }));
        Ok(())
    }
}
