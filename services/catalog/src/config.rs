//! Service configuration
//!
//! Settings are read from `CATALOG_*` environment variables on top of the
//! defaults below, e.g. `CATALOG_BIND_ADDRESS=127.0.0.1:8080`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Where uploaded images are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    /// Files under `public_dir`
    Local,
    /// Objects in `bucket_name`
    S3,
}

/// HTTP server and storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Request body ceiling for multipart uploads
    pub max_upload_bytes: usize,
    pub blob_backend: BlobBackend,
    pub public_dir: String,
    pub bucket_name: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("CATALOG"))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0:3002")?
            .set_default("max_upload_bytes", 10_i64 * 1024 * 1024)?
            .set_default("blob_backend", "local")?
            .set_default("public_dir", "storage/app/public")?
            .set_default("bucket_name", "catalog-public")?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
