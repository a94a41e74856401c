//! Whole-object transfers between memory and an object store bucket.
//!
//! [`BlobStore`] wraps any [`ObjectClient`]; the AWS S3 client implements it
//! directly, and [`LocalObjectClient`] stores objects in a local directory.

pub mod blob_store;
pub mod errors;
pub mod local_store;
pub mod s3_client;
pub mod store;

pub use crate::blob_store::BlobStore;
pub use crate::errors::{BlobError, BlobResult, ObjectClientError, Operation};
pub use crate::local_store::LocalObjectClient;
pub use crate::s3_client::create_s3_client;
pub use crate::store::{ObjectClient, ObjectMetadata};
