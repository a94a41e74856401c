use std::collections::HashMap;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use cloud_session::{load_session, SessionOptions};
use crate::client::{SecretClient, SecretPayload};
use crate::errors::{MalformedPayload, SecretError, SecretResult};

/// Stage label of the active secret version.
pub const VERSION_STAGE_CURRENT: &str = "AWSCURRENT";

pub const GOOGLE_ADMIN_EMAIL: &str = "SSOSyncGoogleAdminEmail";
pub const SCIM_ACCESS_TOKEN: &str = "SSOSyncSCIMAccessToken";
pub const SCIM_ENDPOINT_URL: &str = "SSOSyncSCIMEndpointUrl";
pub const GOOGLE_CREDENTIALS: &str = "SSOSyncGoogleCredentials";

/// Reads named string fields out of a JSON secret record.
///
/// Nothing is cached: every lookup fetches the current version of the secret
/// and parses it again, so rotated values are picked up immediately.
#[derive(Clone, Debug)]
pub struct SecretFields<C = SecretsManagerClient> {
    client: C,
    secret_id: String,
}

impl SecretFields<SecretsManagerClient> {
    /// Builds a Secrets Manager backed reader from the ambient provider configuration.
    pub async fn connect(secret_id: impl Into<String>, options: &SessionOptions) -> SecretResult<Self> {
        let config = load_session(options).await?;
        Ok(Self::new(SecretsManagerClient::new(&config), secret_id))
    }
}

impl<C: SecretClient> SecretFields<C> {
    pub fn new(client: C, secret_id: impl Into<String>) -> Self {
        Self { client, secret_id: secret_id.into() }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub async fn google_admin_email(&self) -> SecretResult<String> {
        self.get_field(GOOGLE_ADMIN_EMAIL).await
    }

    pub async fn scim_access_token(&self) -> SecretResult<String> {
        self.get_field(SCIM_ACCESS_TOKEN).await
    }

    pub async fn scim_endpoint_url(&self) -> SecretResult<String> {
        self.get_field(SCIM_ENDPOINT_URL).await
    }

    pub async fn google_credentials(&self) -> SecretResult<String> {
        self.get_field(GOOGLE_CREDENTIALS).await
    }

    /// Fetches the secret and returns the value of `field`.
    ///
    /// A field missing from the record is an error, not an empty string.
    pub async fn get_field(&self, field: &str) -> SecretResult<String> {
        tracing::debug!("fetching field {} from secret {}", field, self.secret_id);
        let payload = self.client.get_secret_value(&self.secret_id, VERSION_STAGE_CURRENT)
            .await
            .map_err(|e| SecretError::from_client(&self.secret_id, e))?;

        let mut record = parse_record(payload).map_err(|source| {
            tracing::warn!("secret {} is malformed: {}", self.secret_id, source);
            SecretError::MalformedSecret { secret_id: self.secret_id.clone(), source }
        })?;

        record.remove(field).ok_or_else(|| SecretError::FieldNotFound {
            secret_id: self.secret_id.clone(),
            field: field.to_string(),
        })
    }
}

fn parse_record(payload: SecretPayload) -> Result<HashMap<String, String>, MalformedPayload> {
    let text = match payload {
        SecretPayload::Text(text) => text,
        SecretPayload::Binary(encoded) => String::from_utf8(B64.decode(encoded)?)?,
    };
    Ok(serde_json::from_str(&text)?)
}
