//! Common library for the product catalog
//!
//! This crate provides the storage plumbing used by the catalog service:
//! PostgreSQL connectivity, blob storage for uploaded images and the
//! error types both of them report.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod database;
pub mod error;
