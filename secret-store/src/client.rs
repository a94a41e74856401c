use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use crate::errors::{SecretClientError, SecretClientResult};

/// The raw secret value. Binary payloads carry base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Text(String),
    Binary(Vec<u8>),
}

#[async_trait]
pub trait SecretClient: Send + Sync {
    /// Fetches the version of `secret_id` labelled with `version_stage`.
    async fn get_secret_value(&self, secret_id: &str, version_stage: &str) -> SecretClientResult<SecretPayload>;
}

fn classify<R>(err: SdkError<GetSecretValueError, R>) -> SecretClientError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let not_found = err.as_service_error()
        .map(|e| e.is_resource_not_found_exception())
        .unwrap_or(false);
    let denied = matches!(err.code(), Some("AccessDeniedException"));

    if not_found {
        SecretClientError::NotFound
    } else if denied {
        SecretClientError::AccessDenied
    } else {
        SecretClientError::Other(DisplayErrorContext(&err).to_string().into())
    }
}

#[async_trait]
impl SecretClient for SecretsManagerClient {
    async fn get_secret_value(&self, secret_id: &str, version_stage: &str) -> SecretClientResult<SecretPayload> {
        let resp = SecretsManagerClient::get_secret_value(self)
            .secret_id(secret_id)
            .version_stage(version_stage)
            .send()
            .await
            .map_err(classify)?;

        if let Some(text) = resp.secret_string() {
            return Ok(SecretPayload::Text(text.to_string()));
        }
        // Neither field set reads as an empty binary payload.
        let binary = resp.secret_binary()
            .map(|blob| blob.as_ref().to_vec())
            .unwrap_or_default();
        Ok(SecretPayload::Binary(binary))
    }
}
