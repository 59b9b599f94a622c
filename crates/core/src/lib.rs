//! obc-core: Core library for the obc object-storage CLI
//!
//! This crate provides:
//! - Configuration loading and validation
//! - The typed error taxonomy shared by all layers
//! - The ObjectStore trait and listing data model
//! - Listing comparison (diff) and mirror planning (sync)
//! - The copy-then-delete move operation
//! - The external-tool encryption wrapper
//!
//! It is independent of any specific S3 SDK; the adapter crate implements
//! the ObjectStore trait.

pub mod config;
pub mod crypto;
pub mod diff;
pub mod error;
pub mod model;
pub mod store;
pub mod sync;
pub mod transfer;

pub use config::{Config, ConfigManager, RetryConfig, TimeoutConfig};
pub use crypto::Cryptor;
pub use diff::{diff, DiffResult};
pub use error::{Error, Result};
pub use model::{BucketInfo, BucketListing, ObjectRecord};
pub use store::ObjectStore;
pub use sync::{plan, Action, SyncPlan};
pub use transfer::{move_object, MoveError};
