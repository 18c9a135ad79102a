//! Shared test utilities for the item pricing crate.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test items with sensible defaults.

use crate::{
    core::{item, validation::ItemDraft},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an undiscounted test item with the default name.
pub async fn create_test_item(
    db: &DatabaseConnection,
    original_price: f64,
) -> Result<entities::item::Model> {
    item::create_item_from_draft(db, ItemDraft::priced(original_price)).await
}

/// Creates a test item discounted by `percentage`.
pub async fn create_discounted_item(
    db: &DatabaseConnection,
    original_price: f64,
    percentage: i32,
) -> Result<entities::item::Model> {
    item::create_item_from_draft(db, ItemDraft::discounted(original_price, percentage)).await
}
