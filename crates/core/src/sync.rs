//! Mirror planning
//!
//! Computes the minimal copy/delete action sequence that makes a destination
//! bucket's object set match a source bucket's. Plans are constructed fresh
//! per invocation, consumed once, and discarded; execution is performed by
//! the caller through the gateway and is not atomic. Re-running the planner
//! against a partially updated destination yields exactly the remaining
//! actions.

use serde::Serialize;

use crate::model::BucketListing;

/// One step of a sync plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "key", rename_all = "lowercase")]
pub enum Action {
    /// Copy the key from source to destination
    Copy(String),

    /// Delete the key from the destination
    Delete(String),
}

impl Action {
    /// The key this action applies to
    pub fn key(&self) -> &str {
        match self {
            Action::Copy(key) | Action::Delete(key) => key,
        }
    }
}

/// Ordered action sequence produced by `plan`
///
/// All copies precede all deletes, so an interrupted run never leaves the
/// destination with neither old nor new content for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub actions: Vec<Action>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Number of copy actions
    pub fn copies(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Copy(_)))
            .count()
    }

    /// Number of delete actions
    pub fn deletes(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Delete(_)))
            .count()
    }
}

/// Compute the actions needed to make dest match source
///
/// A key is copied when it is absent from dest, when sizes differ, or when
/// both sides report an etag and they differ. Extraneous destination keys
/// are deleted only when `delete_extraneous` is set.
pub fn plan(source: &BucketListing, dest: &BucketListing, delete_extraneous: bool) -> SyncPlan {
    let mut actions = Vec::new();

    for record in source.records() {
        let needs_copy = match dest.get(&record.key) {
            None => true,
            Some(other) => {
                record.size != other.size
                    || match (&record.etag, &other.etag) {
                        (Some(a), Some(b)) => a != b,
                        _ => false,
                    }
            }
        };
        if needs_copy {
            actions.push(Action::Copy(record.key.clone()));
        }
    }

    if delete_extraneous {
        for key in dest.keys() {
            if !source.contains(key) {
                actions.push(Action::Delete(key.to_string()));
            }
        }
    }

    SyncPlan { actions }
}
