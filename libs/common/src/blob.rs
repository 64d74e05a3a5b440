//! Blob storage for uploaded files
//!
//! A blob store keeps opaque byte payloads under string keys. Keys are
//! generated by the store on `put` and are namespaced (`products/<uuid>.png`).
//! Deleting a key that does not exist is not an error.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BlobResult;

pub mod local;
pub mod s3;

pub use local::LocalBlobStore;
pub use s3::S3BlobStore;

/// Payload handed to a blob store
#[derive(Debug, Clone)]
pub struct BlobObject {
    /// Raw file content
    pub bytes: Vec<u8>,
    /// MIME type, forwarded to backends that record it
    pub content_type: String,
    /// File extension without the leading dot
    pub extension: Option<String>,
}

/// Key-value storage for binary objects
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `object` under a fresh key inside `namespace` and return the key
    async fn put(&self, namespace: &str, object: BlobObject) -> BlobResult<String>;

    /// Remove the object stored under `key`
    async fn delete(&self, key: &str) -> BlobResult<()>;
}

/// Generate a fresh key inside `namespace`
pub fn object_key(namespace: &str, extension: Option<&str>) -> String {
    let namespace = namespace.trim_matches('/');
    let name = Uuid::new_v4().simple();
    match extension.filter(|ext| !ext.is_empty()) {
        Some(ext) => format!("{namespace}/{name}.{}", ext.to_ascii_lowercase()),
        None => format!("{namespace}/{name}"),
    }
}
