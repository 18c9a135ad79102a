//! Unified error types for the item pricing crate.

use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The seed configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The storage layer failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An item broke one or more validation rules.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// No item has the requested ID.
    #[error("Item not found: {id}")]
    ItemNotFound { id: i64 },

    /// No category has the requested ID.
    #[error("Category not found: {id}")]
    CategoryNotFound { id: i64 },

    /// Raised by `average_price` when there is nothing to average over.
    #[error("Cannot compute an average over an empty item collection")]
    EmptyAggregate,
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
