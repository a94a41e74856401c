use aws_credential_types::provider::error::CredentialsError;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Failure to establish a usable provider session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("can't create aws session: no region configured")]
    MissingRegion,

    #[error("can't create aws session: no credentials provider configured")]
    MissingCredentials,

    #[error("can't create aws session ({0})")]
    Credentials(#[from] CredentialsError),
}
