use std::error::Error;
use std::string::FromUtf8Error;
use cloud_session::SessionError;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

pub type SecretResult<T> = Result<T, SecretError>;

pub type SecretClientResult<T> = Result<T, SecretClientError>;

/// What a `SecretClient` reports before the caller attaches the secret id.
#[derive(Debug, Error)]
pub enum SecretClientError {
    #[error("secret not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("{0}")]
    Other(#[source] BoxError),
}

/// Why a fetched payload could not be read as a record of string fields.
#[derive(Debug, Error)]
pub enum MalformedPayload {
    #[error("binary payload is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("binary payload is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),

    #[error("payload is not a JSON object of string values")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error(transparent)]
    Configuration(#[from] SessionError),

    #[error("can't get secret value ({secret_id}): secret not found")]
    NotFound { secret_id: String },

    #[error("can't get secret value ({secret_id}): access denied")]
    AccessDenied { secret_id: String },

    #[error("can't get secret value ({secret_id}) ({source})")]
    Fetch {
        secret_id: String,
        #[source]
        source: BoxError,
    },

    #[error("malformed secret ({secret_id}): {source}")]
    MalformedSecret {
        secret_id: String,
        #[source]
        source: MalformedPayload,
    },

    #[error("field {field} not found in secret ({secret_id})")]
    FieldNotFound { secret_id: String, field: String },
}

impl SecretError {
    pub(crate) fn from_client(secret_id: &str, err: SecretClientError) -> Self {
        let secret_id = secret_id.to_string();
        match err {
            SecretClientError::NotFound => SecretError::NotFound { secret_id },
            SecretClientError::AccessDenied => SecretError::AccessDenied { secret_id },
            SecretClientError::Other(source) => SecretError::Fetch { secret_id, source },
        }
    }
}
