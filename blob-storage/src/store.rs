use std::sync::Arc;
use async_trait::async_trait;
use crate::errors::ObjectClientResult;

/// Object metadata as reported by the store, before any transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// Declared size in bytes.
    pub content_length: u64,
}

/// The remote calls a `BlobStore` needs from an object storage client.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Fetches metadata for `key` without transferring the body.
    async fn head_object(&self, bucket: &str, key: &str) -> ObjectClientResult<ObjectMetadata>;

    /// Transfers the full object body into memory.
    async fn get_object(&self, bucket: &str, key: &str) -> ObjectClientResult<Vec<u8>>;

    /// Writes `data` as the object body, replacing whatever was there.
    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> ObjectClientResult<()>;
}

#[async_trait]
impl<T: ObjectClient + ?Sized> ObjectClient for Arc<T> {
    async fn head_object(&self, bucket: &str, key: &str) -> ObjectClientResult<ObjectMetadata> {
        (**self).head_object(bucket, key).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> ObjectClientResult<Vec<u8>> {
        (**self).get_object(bucket, key).await
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> ObjectClientResult<()> {
        (**self).put_object(bucket, key, data).await
    }
}
