use aws_sdk_s3::Client as S3Client;
use cloud_session::{load_session, SessionOptions};
use crate::errors::{BlobError, BlobResult, Operation};
use crate::s3_client::create_s3_client;
use crate::store::ObjectClient;

/// Moves whole in-memory buffers to and from objects in a single bucket.
///
/// The store holds no state besides the client handle and bucket name, so it
/// is safe to share between tasks whenever the client is. Nothing is retried:
/// a failed call is returned to the caller as is.
#[derive(Clone, Debug)]
pub struct BlobStore<C = S3Client> {
    client: C,
    bucket: String,
}

impl BlobStore<S3Client> {
    /// Builds an S3-backed store from the ambient provider configuration.
    pub async fn connect(bucket: impl Into<String>, options: &SessionOptions) -> BlobResult<Self> {
        let config = load_session(options).await?;
        let client = create_s3_client(&config, options.force_path_style);
        Ok(Self::new(client, bucket))
    }
}

impl<C: ObjectClient> BlobStore<C> {
    pub fn new(client: C, bucket: impl Into<String>) -> Self {
        Self { client, bucket: bucket.into() }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Downloads the whole object at `key`.
    ///
    /// The byte count received must match the size declared by the object's
    /// metadata, and must be non-zero: an empty object is an error, never an
    /// empty buffer.
    pub async fn download(&self, key: &str) -> BlobResult<Vec<u8>> {
        tracing::debug!("head object s3://{}/{}", self.bucket, key);
        let metadata = self.client.head_object(&self.bucket, key)
            .await
            .map_err(|e| BlobError::from_client(Operation::HeadObject, &self.bucket, key, e))?;

        tracing::debug!("downloading s3://{}/{} ({} bytes)", self.bucket, key, metadata.content_length);
        let data = self.client.get_object(&self.bucket, key)
            .await
            .map_err(|e| BlobError::from_client(Operation::GetObject, &self.bucket, key, e))?;

        let received = data.len() as u64;
        if received != metadata.content_length {
            tracing::warn!(
                "incomplete download of s3://{}/{}: declared {} bytes, received {}",
                self.bucket, key, metadata.content_length, received
            );
            return Err(BlobError::IncompleteTransfer {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                declared: metadata.content_length,
                received,
            });
        }

        if received == 0 {
            tracing::warn!("empty object at s3://{}/{}", self.bucket, key);
            return Err(BlobError::EmptyObject {
                bucket: self.bucket.clone(),
                key: key.to_string(),
            });
        }

        Ok(data)
    }

    /// Writes `data` to `key`, overwriting any existing object unconditionally.
    pub async fn upload(&self, key: &str, data: &[u8]) -> BlobResult<()> {
        tracing::debug!("uploading {} bytes to s3://{}/{}", data.len(), self.bucket, key);
        self.client.put_object(&self.bucket, key, data)
            .await
            .map_err(|e| BlobError::from_client(Operation::PutObject, &self.bucket, key, e))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use async_trait::async_trait;
    use tempfile::tempdir;
    use uuid::Uuid;
    use crate::errors::{ObjectClientError, ObjectClientResult};
    use crate::local_store::LocalObjectClient;
    use crate::store::ObjectMetadata;

    /// In-memory client whose metadata can be made to disagree with the body,
    /// and whose calls can be made to fail.
    #[derive(Default)]
    struct FakeObjectClient {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        declared_size: Option<u64>,
        deny: bool,
        fail_puts: bool,
    }

    #[async_trait]
    impl ObjectClient for FakeObjectClient {
        async fn head_object(&self, _bucket: &str, key: &str) -> ObjectClientResult<ObjectMetadata> {
            if self.deny {
                return Err(ObjectClientError::AccessDenied);
            }
            let objects = self.objects.lock().unwrap();
            let data = objects.get(key).ok_or(ObjectClientError::NotFound)?;
            let content_length = self.declared_size.unwrap_or(data.len() as u64);
            Ok(ObjectMetadata { content_length })
        }

        async fn get_object(&self, _bucket: &str, key: &str) -> ObjectClientResult<Vec<u8>> {
            let objects = self.objects.lock().unwrap();
            objects.get(key).cloned().ok_or(ObjectClientError::NotFound)
        }

        async fn put_object(&self, _bucket: &str, key: &str, data: &[u8]) -> ObjectClientResult<()> {
            if self.fail_puts {
                return Err(ObjectClientError::Other("connection reset".into()));
            }
            self.objects.lock().unwrap().insert(key.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn local_store(base_path: &std::path::Path) -> BlobStore<LocalObjectClient> {
        std::fs::create_dir_all(base_path.join("bucket")).unwrap();
        BlobStore::new(LocalObjectClient::new(base_path), "bucket")
    }

    #[tokio::test]
    async fn test_upload_then_download() {
        let temp_dir = tempdir().unwrap();
        let store = local_store(temp_dir.path());
        let key = Uuid::new_v4().to_string();
        let data = b"this is test data";

        store.upload(&key, data).await.unwrap();
        let retrieved = store.download(&key).await.unwrap();

        assert_eq!(retrieved, data);
    }

    #[tokio::test]
    async fn test_upload_overwrite() {
        let temp_dir = tempdir().unwrap();
        let store = local_store(temp_dir.path());
        let key = Uuid::new_v4().to_string();

        store.upload(&key, b"data one, longer").await.unwrap();
        store.upload(&key, b"data two").await.unwrap();

        let retrieved = store.download(&key).await.unwrap();
        assert_eq!(retrieved, b"data two");
    }

    #[tokio::test]
    async fn test_download_missing_key() {
        let temp_dir = tempdir().unwrap();
        let store = local_store(temp_dir.path());

        let err = store.download("missing").await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound { op: Operation::HeadObject, .. }));
        assert!(err.to_string().contains("s3://bucket/missing"));
    }

    #[tokio::test]
    async fn test_download_empty_object() {
        let temp_dir = tempdir().unwrap();
        let store = local_store(temp_dir.path());

        store.upload("empty", b"").await.unwrap();
        let err = store.download("empty").await.unwrap_err();

        assert!(matches!(err, BlobError::EmptyObject { .. }));
    }

    #[tokio::test]
    async fn test_download_truncated_transfer() {
        let client = FakeObjectClient { declared_size: Some(64), ..Default::default() };
        let store = BlobStore::new(client, "bucket");
        store.upload("key", b"only a few bytes").await.unwrap();

        let err = store.download("key").await.unwrap_err();

        match err {
            BlobError::IncompleteTransfer { declared, received, .. } => {
                assert_eq!(declared, 64);
                assert_eq!(received, 16);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_download_declared_empty_but_body_present() {
        let client = FakeObjectClient { declared_size: Some(0), ..Default::default() };
        let store = BlobStore::new(client, "bucket");
        store.upload("key", b"late write").await.unwrap();

        let err = store.download("key").await.unwrap_err();
        assert!(matches!(err, BlobError::IncompleteTransfer { declared: 0, received: 10, .. }));
    }

    #[tokio::test]
    async fn test_download_access_denied() {
        let client = FakeObjectClient { deny: true, ..Default::default() };
        let store = BlobStore::new(client, "private");

        let err = store.download("secret").await.unwrap_err();

        assert!(matches!(err, BlobError::AccessDenied { .. }));
        assert_eq!(
            err.to_string(),
            "can't get s3 headobject (s3://private/secret): access denied"
        );
    }

    #[tokio::test]
    async fn test_upload_failure_is_wrapped() {
        let client = FakeObjectClient { fail_puts: true, ..Default::default() };
        let store = BlobStore::new(client, "bucket");

        let err = store.upload("key", b"data").await.unwrap_err();

        assert!(matches!(err, BlobError::Transfer { op: Operation::PutObject, .. }));
        assert_eq!(
            err.to_string(),
            "can't upload object to s3 (s3://bucket/key) (connection reset)"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_stores_share_one_client() {
        let client = Arc::new(FakeObjectClient::default());
        let writer = BlobStore::new(client.clone(), "bucket");
        let reader = BlobStore::new(client, "bucket");

        writer.upload("shared", b"payload").await.unwrap();
        assert_eq!(reader.download("shared").await.unwrap(), b"payload");
    }

    // Needs ambient AWS credentials and a TEST_BUCKET the caller can write to.
    #[tokio::test]
    #[ignore]
    async fn test_s3_round_trip() {
        let bucket = std::env::var("TEST_BUCKET").expect("TEST_BUCKET env var must be set");
        let store = BlobStore::connect(bucket, &SessionOptions::default())
            .await
            .expect("failed to create BlobStore");
        let key = Uuid::new_v4().to_string();
        let data = b"this is test data";

        store.upload(&key, data).await.expect("upload failed");
        let retrieved = store.download(&key).await.expect("download failed");
        assert_eq!(retrieved, data);
    }
}
