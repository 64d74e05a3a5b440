//! Custom error types for the common library
//!
//! This module defines the storage error types shared by the catalog
//! service: relational database failures and blob storage failures.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Custom error type for blob storage operations
#[derive(Error, Debug)]
pub enum BlobError {
    /// Local filesystem failure
    #[error("Blob filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote object storage failure
    #[error("Blob backend error: {0}")]
    Backend(String),

    /// The key does not belong to this store
    #[error("Invalid blob key: {0}")]
    InvalidKey(String),
}

/// Type alias for Result with BlobError
pub type BlobResult<T> = Result<T, BlobError>;
