/// Database configuration and connection management
pub mod database;

/// Seed item loading from config.toml
pub mod items;
