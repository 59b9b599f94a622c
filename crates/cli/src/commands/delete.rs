//! delete command - Remove a bucket
//!
//! A non-empty bucket is a conflict unless --force is given, in which case
//! all contained objects are deleted first.

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;
use crate::output::ProgressBar;

/// Delete a bucket
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Bucket name
    pub bucket: String,

    /// Delete all objects in the bucket first
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    status: &'static str,
    bucket: String,
    objects_removed: usize,
}

/// Execute the delete command
pub async fn execute(args: DeleteArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway.bucket_exists(&args.bucket).await {
        Ok(true) => {}
        Ok(false) => {
            formatter.error(&format!("Bucket '{}' does not exist", args.bucket));
            return ExitCode::UserError;
        }
        Err(e) => return fail(&formatter, &e),
    }

    let mut objects_removed = 0;

    if args.force {
        let listing = match gateway.list_objects(&args.bucket, None).await {
            Ok(l) => l,
            Err(e) => return fail(&formatter, &e),
        };

        let progress = ProgressBar::new(&ctx.output, listing.len() as u64);
        for key in listing.keys() {
            progress.tick(key);
            if let Err(e) = gateway.delete_object(&args.bucket, key).await {
                progress.finish_and_clear();
                return fail(&formatter, &e);
            }
            objects_removed += 1;
        }
        progress.finish_and_clear();
    }

    match gateway.delete_bucket(&args.bucket).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&DeleteOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    objects_removed,
                });
            } else {
                formatter.success(&format!("Bucket '{}' deleted.", args.bucket));
            }
            ExitCode::Success
        }
        Err(obc_core::Error::Conflict(_)) if !args.force => {
            formatter.error(&format!(
                "Bucket '{}' is not empty. Use --force to delete all objects first.",
                args.bucket
            ));
            ExitCode::UserError
        }
        Err(e) => fail(&formatter, &e),
    }
}
