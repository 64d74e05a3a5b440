//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{manager::ProductManager, middleware::JwtVerifier};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt: Arc<JwtVerifier>,
    pub products: ProductManager,
}
