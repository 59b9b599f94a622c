//! Data model for bucket and object snapshots
//!
//! A `BucketListing` is the result of one full enumeration of a bucket at a
//! single point in time. Diffs and sync plans computed from two listings may
//! be stale relative to concurrent external mutation; no locking is
//! attempted, so callers get eventual, not linearizable, results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata snapshot for one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Object key, path-like with '/' separators, unique within a bucket
    pub key: String,

    /// Size in bytes
    pub size: u64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag as reported by the backend (opaque)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectRecord {
    /// Create a new record with just key and size
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            etag: None,
        }
    }

    /// Human-readable size
    pub fn size_human(&self) -> String {
        humansize::format_size(self.size, humansize::BINARY)
    }
}

/// Metadata for a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<jiff::Timestamp>,
}

/// One point-in-time enumeration of a bucket's objects
///
/// Keys are unique by construction and iteration is in key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketListing {
    bucket: String,
    objects: BTreeMap<String, ObjectRecord>,
}

impl BucketListing {
    /// Create an empty listing for the given bucket
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: BTreeMap::new(),
        }
    }

    /// The bucket this listing was taken from
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Insert a record, replacing any previous record for the same key
    pub fn insert(&mut self, record: ObjectRecord) {
        self.objects.insert(record.key.clone(), record);
    }

    /// Look up a record by key
    pub fn get(&self, key: &str) -> Option<&ObjectRecord> {
        self.objects.get(key)
    }

    /// Whether the listing contains the key
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the listing is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Iterate over records in key order
    pub fn records(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.values()
    }

    /// Sum of all object sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.objects.values().map(|r| r.size).sum()
    }
}

impl FromIterator<ObjectRecord> for BucketListing {
    fn from_iter<I: IntoIterator<Item = ObjectRecord>>(iter: I) -> Self {
        let mut listing = Self::default();
        for record in iter {
            listing.insert(record);
        }
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size_human() {
        let record = ObjectRecord::new("a.bin", 2048);
        assert_eq!(record.size_human(), "2 KiB");
    }

    #[test]
    fn test_listing_insert_and_lookup() {
        let mut listing = BucketListing::new("photos");
        listing.insert(ObjectRecord::new("2024/cat.png", 100));
        listing.insert(ObjectRecord::new("2024/dog.png", 200));

        assert_eq!(listing.bucket(), "photos");
        assert_eq!(listing.len(), 2);
        assert!(listing.contains("2024/cat.png"));
        assert_eq!(listing.get("2024/dog.png").unwrap().size, 200);
        assert!(listing.get("missing").is_none());
    }

    #[test]
    fn test_listing_keys_ordered() {
        let mut listing = BucketListing::new("b");
        listing.insert(ObjectRecord::new("z", 1));
        listing.insert(ObjectRecord::new("a", 1));
        listing.insert(ObjectRecord::new("m", 1));

        let keys: Vec<&str> = listing.keys().collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_listing_replaces_duplicate_key() {
        let mut listing = BucketListing::new("b");
        listing.insert(ObjectRecord::new("a", 1));
        listing.insert(ObjectRecord::new("a", 9));

        assert_eq!(listing.len(), 1);
        assert_eq!(listing.get("a").unwrap().size, 9);
    }

    #[test]
    fn test_total_size() {
        let listing: BucketListing = [
            ObjectRecord::new("a", 10),
            ObjectRecord::new("b", 20),
            ObjectRecord::new("c", 30),
        ]
        .into_iter()
        .collect();

        assert_eq!(listing.total_size(), 60);
        assert!(BucketListing::new("empty").total_size() == 0);
    }
}
