//! Blob store on the local filesystem
//!
//! Objects are written below a root directory, typically the public
//! directory served as static assets, so the key doubles as a relative URL.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::info;

use super::{BlobObject, BlobStore, object_key};
use crate::error::{BlobError, BlobResult};

/// Blob store rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of `key`, rejecting keys that escape the root
    fn resolve(&self, key: &str) -> BlobResult<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_plain {
            return Err(BlobError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, namespace: &str, object: BlobObject) -> BlobResult<String> {
        let key = object_key(namespace, object.extension.as_deref());
        let path = self.resolve(&key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &object.bytes).await?;

        info!("Stored blob {} ({} bytes)", key, object.bytes.len());
        Ok(key)
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted blob {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
