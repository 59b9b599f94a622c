//! mv command - Move an object within a bucket
//!
//! Copy-then-delete; there is no atomic server-side rename. When the delete
//! fails after a successful copy the object exists at both keys, and the
//! message says exactly that so the user can retry the delete.

use clap::Args;
use obc_core::{move_object, MoveError};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Move an object within a bucket
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Bucket name
    pub bucket: String,

    /// Source object key
    pub src: String,

    /// Destination object key
    pub dst: String,
}

#[derive(Debug, Serialize)]
struct MvOutput {
    status: &'static str,
    bucket: String,
    src: String,
    dst: String,
    size_bytes: u64,
}

/// Execute the mv command
pub async fn execute(args: MvArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    if args.src == args.dst {
        formatter.error("source and destination keys are identical");
        return ExitCode::UserError;
    }

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match move_object(&gateway, &args.bucket, &args.src, &args.dst).await {
        Ok(record) => {
            if formatter.is_json() {
                formatter.json(&MvOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    src: args.src.clone(),
                    dst: args.dst.clone(),
                    size_bytes: record.size,
                });
            } else {
                formatter.println(&format!(
                    "{}/{} -> {}/{} ({})",
                    args.bucket,
                    args.src,
                    args.bucket,
                    args.dst,
                    record.size_human()
                ));
            }
            ExitCode::Success
        }
        Err(err @ MoveError::DeleteAfterCopy { .. }) => {
            formatter.error(&err.to_string());
            formatter.warning("the object now exists at both keys; retry the delete");
            match err.exit_code() {
                2 => ExitCode::RemoteError,
                _ => ExitCode::UserError,
            }
        }
        Err(MoveError::Copy { source, .. }) => fail(&formatter, &source),
    }
}
