//! Resolves provider configuration into a session shared by the storage and
//! secret adapters.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use serde::Deserialize;

pub mod errors;

pub use crate::errors::{SessionError, SessionResult};

/// Options for building a session. Anything left unset falls back to the
/// provider's default chains (environment, shared config files, instance role).
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SessionOptions {
    pub region: Option<String>,
    /// Named profile from the shared config files.
    pub profile: Option<String>,
    /// Overrides the service endpoint, e.g. a local MinIO server.
    pub endpoint_url: Option<String>,
    /// Path-style bucket addressing. Only applies to object storage clients.
    pub force_path_style: bool,
    pub credentials: Option<StaticCredentials>,
}

#[derive(Deserialize, Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

impl SessionOptions {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_credentials(mut self, credentials: StaticCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// Loads the shared provider configuration and checks that it can actually
/// sign requests: a region must resolve and the credentials provider must
/// hand back credentials.
pub async fn load_session(options: &SessionOptions) -> SessionResult<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = &options.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &options.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint_url) = &options.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    if let Some(creds) = &options.credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            creds.session_token.clone(),
            None,
            "cloud-session-static",
        ));
    }

    verify_session(loader.load().await).await
}

async fn verify_session(config: SdkConfig) -> SessionResult<SdkConfig> {
    if config.region().is_none() {
        return Err(SessionError::MissingRegion);
    }
    let provider = config
        .credentials_provider()
        .ok_or(SessionError::MissingCredentials)?;
    provider.provide_credentials().await?;

    tracing::debug!(
        "aws session ready, region: {:?}, endpoint: {:?}",
        config.region(),
        config.endpoint_url()
    );
    Ok(config)
}
