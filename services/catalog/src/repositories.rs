//! Repositories for database operations
//!
//! The product manager talks to storage through the [`ProductStore`] and
//! [`UserDirectory`] traits; the PostgreSQL implementations live in the
//! submodules.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Product, User};

pub mod product;
pub mod user;

pub use product::ProductRepository;
pub use user::UserRepository;

/// Persistent store for product records
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, in storage order
    async fn list_all(&self) -> DatabaseResult<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Product>>;

    async fn insert(&self, product: &Product) -> DatabaseResult<Product>;

    /// Overwrite every mutable column of an existing product
    async fn update(&self, product: &Product) -> DatabaseResult<Product>;

    async fn delete(&self, id: Uuid) -> DatabaseResult<()>;
}

/// Read-only view of the users known to the identity provider
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;
}
