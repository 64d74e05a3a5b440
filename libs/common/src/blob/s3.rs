//! S3-backed blob store

use async_trait::async_trait;
use aws_sdk_s3::{Client, error::DisplayErrorContext, primitives::ByteStream};
use tracing::info;

use super::{BlobObject, BlobStore, object_key};
use crate::error::{BlobError, BlobResult};

/// Blob store writing objects into a single S3 bucket
#[derive(Clone)]
pub struct S3BlobStore {
    s3_client: Client,
    bucket_name: String,
}

impl S3BlobStore {
    pub fn new(s3_client: Client, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, namespace: &str, object: BlobObject) -> BlobResult<String> {
        let key = object_key(namespace, object.extension.as_deref());
        info!("Uploading blob to S3: {}/{}", self.bucket_name, key);

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .body(ByteStream::from(object.bytes))
            .content_type(object.content_type)
            .send()
            .await
            .map_err(backend_error)?;

        Ok(key)
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        info!("Deleting blob from S3: {}/{}", self.bucket_name, key);

        // S3 reports success for keys that do not exist.
        self.s3_client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(backend_error)?;

        Ok(())
    }
}

/// Backend error carrying the whole source chain; an SDK error's own message
/// is only "service error".
fn backend_error<E: std::error::Error>(err: E) -> BlobError {
    BlobError::Backend(DisplayErrorContext(err).to_string())
}
