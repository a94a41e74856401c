//! Named field lookups in a JSON secret record held by a secret store.

pub mod client;
pub mod errors;
pub mod secrets;

pub use crate::client::{SecretClient, SecretPayload};
pub use crate::errors::{MalformedPayload, SecretClientError, SecretError, SecretResult};
pub use crate::secrets::{
    SecretFields, GOOGLE_ADMIN_EMAIL, GOOGLE_CREDENTIALS, SCIM_ACCESS_TOKEN, SCIM_ENDPOINT_URL,
    VERSION_STAGE_CURRENT,
};
