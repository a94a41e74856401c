use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use crate::errors::{ObjectClientError, ObjectClientResult};
use crate::store::{ObjectClient, ObjectMetadata};

/// An `ObjectClient` backed by a local directory: one subdirectory per
/// bucket, one file per key. Handy for development without an S3 endpoint.
#[derive(Clone, Debug)]
pub struct LocalObjectClient {
    base_path: PathBuf,
}

impl LocalObjectClient {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> ObjectClientResult<PathBuf> {
        // Keys may contain '/', but must stay inside the bucket directory.
        // A bucket is exactly one directory below the base path.
        let escapes = Path::new(key)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        let mut bucket_components = Path::new(bucket).components();
        let bucket_ok = matches!(
            (bucket_components.next(), bucket_components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !bucket_ok || key.is_empty() || escapes {
            return Err(ObjectClientError::Other(
                format!("invalid object key {bucket:?}/{key:?}").into(),
            ));
        }
        Ok(self.base_path.join(bucket).join(key))
    }
}

fn classify(err: std::io::Error) -> ObjectClientError {
    match err.kind() {
        ErrorKind::NotFound => ObjectClientError::NotFound,
        ErrorKind::PermissionDenied => ObjectClientError::AccessDenied,
        _ => ObjectClientError::Other(Box::new(err)),
    }
}

#[async_trait]
impl ObjectClient for LocalObjectClient {
    async fn head_object(&self, bucket: &str, key: &str) -> ObjectClientResult<ObjectMetadata> {
        let path = self.object_path(bucket, key)?;
        let metadata = fs::metadata(path).await.map_err(classify)?;
        if !metadata.is_file() {
            return Err(ObjectClientError::NotFound);
        }
        Ok(ObjectMetadata { content_length: metadata.len() })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> ObjectClientResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        fs::read(path).await.map_err(classify)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> ObjectClientResult<()> {
        let path = self.object_path(bucket, key)?;
        let bucket_dir = self.base_path.join(bucket);
        if !fs::try_exists(&bucket_dir).await.map_err(classify)? {
            return Err(ObjectClientError::NotFound);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(classify)?;
        }
        // fs::write truncates, so an existing object is replaced.
        fs::write(path, data).await.map_err(classify)?;
        Ok(())
    }
}
