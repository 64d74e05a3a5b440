//! Product repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::ProductStore;
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, user_id, name, price, stock, description, wa, ig, image, \
                               created_at, updated_at";

/// Product repository backed by PostgreSQL
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        price: row.get("price"),
        stock: row.get("stock"),
        description: row.get("description"),
        wa: row.get("wa"),
        ig: row.get("ig"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_all(&self) -> DatabaseResult<Vec<Product>> {
        let rows = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn insert(&self, product: &Product) -> DatabaseResult<Product> {
        info!("Inserting product {} for user {}", product.id, product.user_id);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (id, user_id, name, price, stock, description, wa, ig, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(product.user_id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.description)
        .bind(&product.wa)
        .bind(&product.ig)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(product_from_row(&row))
    }

    async fn update(&self, product: &Product) -> DatabaseResult<Product> {
        info!("Updating product {}", product.id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = $2, price = $3, stock = $4, description = $5,
                wa = $6, ig = $7, image = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.description)
        .bind(&product.wa)
        .bind(&product.ig)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(product_from_row(&row))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        info!("Deleting product {}", id);

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }
}
