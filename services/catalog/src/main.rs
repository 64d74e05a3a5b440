use std::sync::Arc;

use anyhow::Result;
use aws_config::BehaviorVersion;
use common::blob::{BlobStore, LocalBlobStore, S3BlobStore};
use common::database::{DatabaseConfig, init_pool, run_migrations};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod manager;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod test_support;
mod validation;

use crate::{
    config::{BlobBackend, ServerConfig},
    manager::ProductManager,
    repositories::{ProductRepository, UserRepository},
    state::AppState,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting catalog service");

    let server_config = ServerConfig::from_env()?;
    let jwt = middleware::verifier_from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool, &MIGRATOR).await?;

    let blobs = blob_store(&server_config).await;

    let products = ProductManager::new(
        Arc::new(ProductRepository::new(pool.clone())),
        Arc::new(UserRepository::new(pool.clone())),
        blobs,
    );

    let app_state = AppState {
        db_pool: pool,
        jwt: Arc::new(jwt),
        products,
    };

    // Start the web server
    let app = routes::create_router(app_state, server_config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    info!("Catalog service listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn blob_store(config: &ServerConfig) -> Arc<dyn BlobStore> {
    match config.blob_backend {
        BlobBackend::Local => {
            info!("Storing product images under {}", config.public_dir);
            Arc::new(LocalBlobStore::new(&config.public_dir))
        }
        BlobBackend::S3 => {
            info!("Storing product images in bucket {}", config.bucket_name);
            let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
            Arc::new(S3BlobStore::new(
                aws_sdk_s3::Client::new(&aws),
                config.bucket_name.clone(),
            ))
        }
    }
}
