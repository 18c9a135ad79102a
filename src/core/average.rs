//! Average price aggregation across every stored item.
//!
//! The aggregate reads through the [`ItemRepository`] trait instead of reaching into
//! a global table, so it can run against SeaORM or any in-memory snapshot. The
//! repository is expected to return a consistent snapshot for the duration of one call.

use crate::{
    core::pricing::apply_discount,
    entities::{Item, item},
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*, sea_query::Expr};
use tracing::{debug, instrument};

/// Read-only storage operations the average price needs.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Sum of `original_price` over items without a discount; `0.0` when there are none.
    async fn sum_undiscounted_prices(&self) -> Result<f64>;

    /// `(original_price, discount_percentage)` for every discounted item, in a stable order.
    async fn discounted_price_pairs(&self) -> Result<Vec<(f64, i32)>>;

    /// Total number of items, discounted or not.
    async fn count_items(&self) -> Result<u64>;
}

#[async_trait]
impl ItemRepository for DatabaseConnection {
    async fn sum_undiscounted_prices(&self) -> Result<f64> {
        // SUM over zero rows is NULL
        let total: Option<Option<f64>> = Item::find()
            .select_only()
            .column_as(Expr::col(item::Column::OriginalPrice).sum(), "total")
            .filter(item::Column::HasDiscount.eq(false))
            .into_tuple()
            .one(self)
            .await?;
        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn discounted_price_pairs(&self) -> Result<Vec<(f64, i32)>> {
        Item::find()
            .select_only()
            .column(item::Column::OriginalPrice)
            .column(item::Column::DiscountPercentage)
            .filter(item::Column::HasDiscount.eq(true))
            .order_by_asc(item::Column::Id)
            .into_tuple()
            .all(self)
            .await
            .map_err(Into::into)
    }

    async fn count_items(&self) -> Result<u64> {
        Item::find().count(self).await.map_err(Into::into)
    }
}

/// Arithmetic mean of the effective price of every item in `repo`.
///
/// Undiscounted prices are summed by the repository in one aggregate. Discounted
/// items are fetched as pairs and each one is rounded to cents by [`apply_discount`]
/// before it is added, so rounding happens per item and never on the final mean.
///
/// # Errors
/// Returns `Error::EmptyAggregate` when the repository holds no items, and propagates
/// any repository error.
#[instrument(skip(repo))]
pub async fn average_price<R>(repo: &R) -> Result<f64>
where
    R: ItemRepository + ?Sized,
{
    let count = repo.count_items().await?;
    if count == 0 {
        return Err(Error::EmptyAggregate);
    }

    let sum_undiscounted = repo.sum_undiscounted_prices().await?;
    let sum_discounted = repo
        .discounted_price_pairs()
        .await?
        .into_iter()
        .fold(0.0, |acc, (price, percentage)| {
            acc + apply_discount(price, percentage)
        });

    #[allow(clippy::cast_precision_loss)]
    let average = (sum_undiscounted + sum_discounted) / count as f64;
    debug!(
        "Average over {} item(s): undiscounted sum {}, discounted sum {} -> {}",
        count, sum_undiscounted, sum_discounted, average
    );
    Ok(average)
}
