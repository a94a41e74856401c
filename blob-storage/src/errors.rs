use std::error::Error;
use std::fmt::{self, Display, Formatter};
use cloud_session::SessionError;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

pub type BlobResult<T> = Result<T, BlobError>;

pub type ObjectClientResult<T> = Result<T, ObjectClientError>;

/// What an `ObjectClient` reports before the store attaches bucket/key context.
#[derive(Debug, Error)]
pub enum ObjectClientError {
    #[error("object or bucket not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("{0}")]
    Other(#[source] BoxError),
}

/// The remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    HeadObject,
    GetObject,
    PutObject,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operation::HeadObject => write!(f, "get s3 headobject"),
            Operation::GetObject => write!(f, "download object from s3"),
            Operation::PutObject => write!(f, "upload object to s3"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BlobError {
    #[error(transparent)]
    Configuration(#[from] SessionError),

    #[error("can't {op} (s3://{bucket}/{key}): object or bucket not found")]
    NotFound { op: Operation, bucket: String, key: String },

    #[error("can't {op} (s3://{bucket}/{key}): access denied")]
    AccessDenied { op: Operation, bucket: String, key: String },

    #[error("can't download whole object from s3 (s3://{bucket}/{key}) size ({received}), expected ({declared})")]
    IncompleteTransfer { bucket: String, key: String, declared: u64, received: u64 },

    #[error("zero bytes written to memory (s3://{bucket}/{key})")]
    EmptyObject { bucket: String, key: String },

    #[error("can't {op} (s3://{bucket}/{key}) ({source})")]
    Transfer {
        op: Operation,
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },
}

impl BlobError {
    pub(crate) fn from_client(op: Operation, bucket: &str, key: &str, err: ObjectClientError) -> Self {
        let bucket = bucket.to_string();
        let key = key.to_string();
        match err {
            ObjectClientError::NotFound => BlobError::NotFound { op, bucket, key },
            ObjectClientError::AccessDenied => BlobError::AccessDenied { op, bucket, key },
            ObjectClientError::Other(source) => BlobError::Transfer { op, bucket, key, source },
        }
    }
}
