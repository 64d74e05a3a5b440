//! Integration tests for the infrastructure components
//!
//! These tests verify that PostgreSQL is reachable with the configured
//! settings and that the local blob store behaves like a key-value store
//! from outside the crate.

use common::{
    blob::{BlobObject, BlobStore, LocalBlobStore},
    database::{DatabaseConfig, health_check, init_pool},
};
use sqlx::Row;

/// Test that verifies PostgreSQL is accessible and can run a query
#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_database_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}

/// Store, replace and delete an image the way the catalog does
#[tokio::test]
async fn test_local_blob_store_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store: Box<dyn BlobStore> = Box::new(LocalBlobStore::new(dir.path()));

    let image = |bytes: &[u8]| BlobObject {
        bytes: bytes.to_vec(),
        content_type: "image/jpeg".to_string(),
        extension: Some("jpg".to_string()),
    };

    let first = store.put("products", image(b"first")).await?;
    store.delete(&first).await?;
    let second = store.put("products", image(b"second")).await?;

    assert_ne!(first, second);
    assert!(!dir.path().join(&first).exists());
    assert_eq!(tokio::fs::read(dir.path().join(&second)).await?, b"second");

    Ok(())
}
