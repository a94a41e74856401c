use std::error::Error;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use crate::errors::{ObjectClientError, ObjectClientResult};
use crate::store::{ObjectClient, ObjectMetadata};

/// Creates an S3 client from a loaded session.
/// S3-compatible servers such as MinIO usually need `force_path_style`.
pub fn create_s3_client(config: &SdkConfig, force_path_style: bool) -> S3Client {
    let conf = Builder::from(config)
        .force_path_style(force_path_style)
        .build();
    S3Client::from_conf(conf)
}

fn classify<E>(err: SdkError<E, HttpResponse>) -> ObjectClientError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|resp| resp.status().as_u16());
    let code = err.code();
    let not_found = status == Some(404)
        || matches!(code, Some("NotFound" | "NoSuchKey" | "NoSuchBucket"));
    let denied = status == Some(403) || matches!(code, Some("AccessDenied" | "Forbidden"));

    if not_found {
        ObjectClientError::NotFound
    } else if denied {
        ObjectClientError::AccessDenied
    } else {
        // The SdkError's own Display drops the cause, e.g. a refused connection.
        ObjectClientError::Other(DisplayErrorContext(&err).to_string().into())
    }
}

#[async_trait]
impl ObjectClient for S3Client {
    async fn head_object(&self, bucket: &str, key: &str) -> ObjectClientResult<ObjectMetadata> {
        let resp = S3Client::head_object(self)
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(classify)?;
        // A missing Content-Length counts as zero.
        let content_length = resp.content_length()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        Ok(ObjectMetadata { content_length })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> ObjectClientResult<Vec<u8>> {
        let resp = S3Client::get_object(self)
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(classify)?;
        let data = resp.body.collect().await
            .map_err(|e| ObjectClientError::Other(Box::new(e)))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> ObjectClientResult<()> {
        S3Client::put_object(self)
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }
}
