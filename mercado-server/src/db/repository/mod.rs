//! Repository Module
//!
//! Plain-function CRUD over the SQLite pool, one module per table group.
//! All queries are runtime-checked (`sqlx::query`/`query_as`), bound by
//! position.

// Catalog
pub mod categories;
pub mod products;

// Orders (placement workflow + history reads)
pub mod orders;

// Users and customers
pub mod users;

use shared::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Repository errors surface to handlers as [`AppError`]; the duplicate
/// case maps to a 400 because the public contract reports conflicts as
/// validation failures ("Username already exists").
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
