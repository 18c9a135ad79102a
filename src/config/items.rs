//! Seed item configuration loaded from config.toml
//!
//! Items listed under `[[items]]` are inserted on startup when the items table is
//! still empty. Each entry is an [`ItemDraft`], so missing fields take the column
//! defaults and every entry goes through validation before it is stored.

use crate::{
    core::{item, validation::ItemDraft},
    entities::Item,
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Items to seed into an empty database
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
///
/// A missing file is not an error; it yields an empty configuration.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if !path.exists() {
        warn!("No config.toml found, starting without seed items");
        return Ok(Config::default());
    }
    load_config(path)
}

/// Inserts the configured items if the items table is empty.
///
/// Every draft is validated first; a single invalid entry aborts seeding before
/// anything is written. The inserts share one transaction, so a failed insert
/// leaves the table empty and the next start seeds again. Returns the number of
/// items inserted.
#[instrument(skip(db, config), fields(configured = config.items.len()))]
pub async fn seed_items(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let existing = Item::find().count(db).await?;
    if existing > 0 {
        info!("Items table already holds {} item(s), skipping seed", existing);
        return Ok(0);
    }

    let validated = config
        .items
        .iter()
        .cloned()
        .map(ItemDraft::validate)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let seeded = validated.len();
    let txn = db.begin().await?;
    for new_item in validated {
        if let Err(e) = item::create_item(&txn, new_item).await {
            txn.rollback().await?;
            return Err(e);
        }
    }
    txn.commit().await?;
    info!("Seeded {} item(s)", seeded);
    Ok(seeded)
}
