//! rm command - Remove objects
//!
//! Removes a single object, or with --recursive every object under the
//! given key treated as a prefix.

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key, or key prefix with --recursive
    pub key: String,

    /// Remove every object under the key prefix
    #[arg(short, long)]
    pub recursive: bool,

    /// Only show what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    bucket: String,
    removed: Vec<String>,
    total: usize,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let keys: Vec<String> = if args.recursive {
        match gateway.list_objects(&args.bucket, Some(&args.key)).await {
            Ok(listing) => listing.keys().map(str::to_string).collect(),
            Err(e) => return fail(&formatter, &e),
        }
    } else {
        vec![args.key.clone()]
    };

    if keys.is_empty() {
        formatter.warning(&format!(
            "no objects found under {}/{}",
            args.bucket, args.key
        ));
        return ExitCode::Success;
    }

    if args.dry_run {
        for key in &keys {
            formatter.println(&format!("Would remove: {}/{}", args.bucket, key));
        }
        return ExitCode::Success;
    }

    let mut removed = Vec::new();
    for key in &keys {
        match gateway.delete_object(&args.bucket, key).await {
            Ok(()) => {
                if !formatter.is_json() {
                    formatter.println(&format!("Removed: {}/{}", args.bucket, key));
                }
                removed.push(key.clone());
            }
            Err(e) => return fail(&formatter, &e),
        }
    }

    if formatter.is_json() {
        formatter.json(&RmOutput {
            status: "success",
            bucket: args.bucket.clone(),
            total: removed.len(),
            removed,
        });
    }

    ExitCode::Success
}
