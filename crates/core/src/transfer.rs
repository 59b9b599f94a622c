//! Object rename
//!
//! S3-compatible backends have no atomic rename; a move is a server-side
//! copy followed by a delete of the source. If the delete fails after the
//! copy succeeded, the object exists at both keys; the error type carries
//! that state so callers can detect it and retry the delete instead of
//! silently losing track of the duplicate.

use crate::error::Error;
use crate::model::ObjectRecord;
use crate::store::ObjectStore;

/// Failure modes of a move operation
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The copy step failed; the destination was not written
    #[error("copy to '{dst}' failed: {source}")]
    Copy {
        dst: String,
        #[source]
        source: Error,
    },

    /// The copy succeeded but the source delete failed; the object now
    /// exists at both keys
    #[error("copied to '{dst}' but failed to delete '{src}': {source}")]
    DeleteAfterCopy {
        src: String,
        dst: String,
        #[source]
        source: Error,
    },
}

impl MoveError {
    /// Exit code of the underlying gateway error
    pub const fn exit_code(&self) -> i32 {
        match self {
            MoveError::Copy { source, .. } | MoveError::DeleteAfterCopy { source, .. } => {
                source.exit_code()
            }
        }
    }
}

/// Move an object within a bucket via copy-then-delete
///
/// Returns the record of the object at its new key.
pub async fn move_object<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    src_key: &str,
    dst_key: &str,
) -> Result<ObjectRecord, MoveError> {
    let record = store
        .copy_object(bucket, src_key, bucket, dst_key)
        .await
        .map_err(|source| MoveError::Copy {
            dst: dst_key.to_string(),
            source,
        })?;

    store
        .delete_object(bucket, src_key)
        .await
        .map_err(|source| MoveError::DeleteAfterCopy {
            src: src_key.to_string(),
            dst: dst_key.to_string(),
            source,
        })?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::model::{BucketInfo, BucketListing};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory ObjectStore used to exercise move/mirror semantics
    struct MemStore {
        buckets: Mutex<BTreeMap<String, BTreeMap<String, Vec<u8>>>>,
        fail_deletes: bool,
    }

    impl MemStore {
        fn new() -> Self {
            Self {
                buckets: Mutex::new(BTreeMap::new()),
                fail_deletes: false,
            }
        }

        fn failing_deletes() -> Self {
            Self {
                fail_deletes: true,
                ..Self::new()
            }
        }

        fn with_object(self, bucket: &str, key: &str, data: &[u8]) -> Self {
            self.buckets
                .lock()
                .unwrap()
                .entry(bucket.to_string())
                .or_default()
                .insert(key.to_string(), data.to_vec());
            self
        }
    }

    #[async_trait]
    impl ObjectStore for MemStore {
        async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
            Ok(self
                .buckets
                .lock()
                .unwrap()
                .keys()
                .map(|name| BucketInfo {
                    name: name.clone(),
                    created: None,
                })
                .collect())
        }

        async fn list_objects(
            &self,
            bucket: &str,
            prefix: Option<&str>,
        ) -> Result<BucketListing> {
            let buckets = self.buckets.lock().unwrap();
            let objects = buckets
                .get(bucket)
                .ok_or_else(|| Error::NotFound(bucket.to_string()))?;

            let mut listing = BucketListing::new(bucket);
            for (key, data) in objects {
                if prefix.is_none_or(|p| key.starts_with(p)) {
                    listing.insert(ObjectRecord::new(key.clone(), data.len() as u64));
                }
            }
            Ok(listing)
        }

        async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectRecord> {
            let buckets = self.buckets.lock().unwrap();
            buckets
                .get(bucket)
                .and_then(|b| b.get(key))
                .map(|data| ObjectRecord::new(key, data.len() as u64))
                .ok_or_else(|| Error::NotFound(format!("{bucket}/{key}")))
        }

        async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
            let buckets = self.buckets.lock().unwrap();
            buckets
                .get(bucket)
                .and_then(|b| b.get(key))
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("{bucket}/{key}")))
        }

        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            data: Vec<u8>,
            _content_type: Option<&str>,
        ) -> Result<ObjectRecord> {
            let size = data.len() as u64;
            self.buckets
                .lock()
                .unwrap()
                .entry(bucket.to_string())
                .or_default()
                .insert(key.to_string(), data);
            Ok(ObjectRecord::new(key, size))
        }

        async fn copy_object(
            &self,
            src_bucket: &str,
            src_key: &str,
            dst_bucket: &str,
            dst_key: &str,
        ) -> Result<ObjectRecord> {
            let mut buckets = self.buckets.lock().unwrap();
            let data = buckets
                .get(src_bucket)
                .and_then(|b| b.get(src_key))
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("{src_bucket}/{src_key}")))?;

            let size = data.len() as u64;
            buckets
                .entry(dst_bucket.to_string())
                .or_default()
                .insert(dst_key.to_string(), data);
            Ok(ObjectRecord::new(dst_key, size))
        }

        async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
            if self.fail_deletes {
                return Err(Error::Transport("simulated delete failure".into()));
            }
            let mut buckets = self.buckets.lock().unwrap();
            buckets
                .get_mut(bucket)
                .and_then(|b| b.remove(key))
                .map(|_| ())
                .ok_or_else(|| Error::NotFound(format!("{bucket}/{key}")))
        }

        async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
            Ok(self.buckets.lock().unwrap().contains_key(bucket))
        }

        async fn create_bucket(&self, bucket: &str) -> Result<()> {
            let mut buckets = self.buckets.lock().unwrap();
            if buckets.contains_key(bucket) {
                return Err(Error::Conflict(format!("bucket '{bucket}' already exists")));
            }
            buckets.insert(bucket.to_string(), BTreeMap::new());
            Ok(())
        }

        async fn delete_bucket(&self, bucket: &str) -> Result<()> {
            let mut buckets = self.buckets.lock().unwrap();
            match buckets.get(bucket) {
                None => return Err(Error::NotFound(bucket.to_string())),
                Some(objects) if !objects.is_empty() => {
                    return Err(Error::Conflict(format!("bucket '{bucket}' is not empty")));
                }
                Some(_) => {}
            }
            buckets.remove(bucket);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_move_renames_object() {
        let store = MemStore::new().with_object("b", "old.txt", b"hello");

        let record = move_object(&store, "b", "old.txt", "new.txt").await.unwrap();
        assert_eq!(record.size, 5);

        let listing = store.list_objects("b", None).await.unwrap();
        assert!(listing.contains("new.txt"));
        assert!(!listing.contains("old.txt"));
        assert_eq!(listing.get("new.txt").unwrap().size, 5);
    }

    #[tokio::test]
    async fn test_move_missing_source_fails_cleanly() {
        let store = MemStore::new().with_object("b", "other.txt", b"x");

        let err = move_object(&store, "b", "missing.txt", "new.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, MoveError::Copy { .. }));
        assert_eq!(err.exit_code(), 1);

        // Destination untouched
        let listing = store.list_objects("b", None).await.unwrap();
        assert!(!listing.contains("new.txt"));
    }

    #[tokio::test]
    async fn test_move_delete_failure_leaves_both_keys() {
        let store = MemStore::failing_deletes().with_object("b", "old.txt", b"hello");

        let err = move_object(&store, "b", "old.txt", "new.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, MoveError::DeleteAfterCopy { .. }));
        assert_eq!(err.exit_code(), 2);

        // Non-atomic rename: both keys exist after a failed delete
        let listing = store.list_objects("b", None).await.unwrap();
        assert!(listing.contains("old.txt"));
        assert!(listing.contains("new.txt"));
    }

    #[tokio::test]
    async fn test_mirror_plan_converges_against_store() {
        use crate::sync::{plan, Action};

        let store = MemStore::new()
            .with_object("src", "a", b"0123456789")
            .with_object("src", "b", &[7u8; 20])
            .with_object("dst", "b", &[7u8; 25])
            .with_object("dst", "c", b"12345");

        let source = store.list_objects("src", None).await.unwrap();
        let dest = store.list_objects("dst", None).await.unwrap();
        let first = plan(&source, &dest, true);
        assert_eq!(first.len(), 3);

        // Execute the plan the way the mirror command does
        for action in &first.actions {
            match action {
                Action::Copy(key) => {
                    store.copy_object("src", key, "dst", key).await.unwrap();
                }
                Action::Delete(key) => {
                    store.delete_object("dst", key).await.unwrap();
                }
            }
        }

        let dest = store.list_objects("dst", None).await.unwrap();
        assert!(plan(&source, &dest, true).is_empty());
        assert_eq!(dest.total_size(), source.total_size());
    }
}
