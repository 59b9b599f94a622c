//! ObjectStore trait definition
//!
//! The gateway contract for S3-compatible storage. The CLI and the engines
//! depend only on this trait, keeping them decoupled from the SDK adapter.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{BucketInfo, BucketListing, ObjectRecord};

/// Trait for S3-compatible storage operations
///
/// Implementations map backend failures into the typed error taxonomy:
/// `Transport` for network/auth failures, `NotFound` for absent buckets or
/// objects, `Conflict` for create-exists and delete-non-empty. Methods never
/// print; presentation belongs to the boundary layer.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Enumerate a bucket, optionally restricted to a key prefix
    ///
    /// Paginates until exhaustion; the returned listing is always complete.
    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<BucketListing>;

    /// Get object metadata without fetching the body
    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectRecord>;

    /// Get object content
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Upload object content
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<ObjectRecord>;

    /// Server-side copy between keys, within or across buckets
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<ObjectRecord>;

    /// Delete a single object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Delete a bucket (must be empty)
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;
}
