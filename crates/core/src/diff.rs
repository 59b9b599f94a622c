//! Listing comparison
//!
//! Computes the set-difference and size-difference between two bucket
//! listings. Sizes are compared byte-exact; no checksum comparison is
//! attempted, so objects of equal size but different content are reported
//! as identical.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::BucketListing;

/// Result of comparing two bucket listings
///
/// Derived, never persisted. All collections iterate in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// Keys present in source, absent in dest
    pub only_in_source: Vec<String>,

    /// Keys present in dest, absent in source
    pub only_in_dest: Vec<String>,

    /// Keys present in both with differing sizes: key -> (source, dest)
    pub size_mismatch: BTreeMap<String, (u64, u64)>,
}

impl DiffResult {
    /// Whether the two listings were identical
    pub fn is_empty(&self) -> bool {
        self.only_in_source.is_empty()
            && self.only_in_dest.is_empty()
            && self.size_mismatch.is_empty()
    }

    /// Total number of differing keys
    pub fn len(&self) -> usize {
        self.only_in_source.len() + self.only_in_dest.len() + self.size_mismatch.len()
    }
}

/// Compare two listings
///
/// Pure function of its inputs; the result is deterministic for any pair of
/// listings regardless of how they were built.
pub fn diff(source: &BucketListing, dest: &BucketListing) -> DiffResult {
    let mut result = DiffResult::default();

    for record in source.records() {
        match dest.get(&record.key) {
            None => result.only_in_source.push(record.key.clone()),
            Some(other) if other.size != record.size => {
                result
                    .size_mismatch
                    .insert(record.key.clone(), (record.size, other.size));
            }
            Some(_) => {}
        }
    }

    for key in dest.keys() {
        if !source.contains(key) {
            result.only_in_dest.push(key.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectRecord;

    fn listing(bucket: &str, entries: &[(&str, u64)]) -> BucketListing {
        let mut listing = BucketListing::new(bucket);
        for (key, size) in entries {
            listing.insert(ObjectRecord::new(*key, *size));
        }
        listing
    }

    #[test]
    fn test_diff_identical_listings() {
        let a = listing("a", &[("x", 1), ("y", 2)]);
        let result = diff(&a, &a);
        assert!(result.is_empty());
        assert_eq!(result, DiffResult::default());
    }

    #[test]
    fn test_diff_both_empty() {
        let a = listing("a", &[]);
        let b = listing("b", &[]);
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn test_diff_reports_each_kind() {
        let source = listing("src", &[("a", 10), ("b", 20)]);
        let dest = listing("dst", &[("b", 25), ("c", 5)]);

        let result = diff(&source, &dest);
        assert_eq!(result.only_in_source, vec!["a"]);
        assert_eq!(result.only_in_dest, vec!["c"]);
        assert_eq!(result.size_mismatch.get("b"), Some(&(20, 25)));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_diff_symmetry() {
        let a = listing("a", &[("x", 1), ("y", 2), ("shared", 7)]);
        let b = listing("b", &[("z", 3), ("shared", 7)]);

        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        assert_eq!(forward.only_in_source, backward.only_in_dest);
        assert_eq!(forward.only_in_dest, backward.only_in_source);
        assert_eq!(
            forward.size_mismatch.keys().collect::<Vec<_>>(),
            backward.size_mismatch.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_diff_equal_size_different_keys_match() {
        // Equal sizes compare as identical even if content differs upstream
        let a = listing("a", &[("k", 42)]);
        let b = listing("b", &[("k", 42)]);
        assert!(diff(&a, &b).is_empty());
    }

    #[test]
    fn test_diff_output_is_sorted() {
        let a = listing("a", &[("zebra", 1), ("apple", 1), ("mango", 1)]);
        let b = listing("b", &[]);

        let result = diff(&a, &b);
        assert_eq!(result.only_in_source, vec!["apple", "mango", "zebra"]);
    }
}
