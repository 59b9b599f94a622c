//! du command - Summarize disk usage in a bucket
//!
//! One full listing, summed client-side.

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Summarize disk usage in a bucket
#[derive(Args, Debug)]
pub struct DuArgs {
    /// Bucket name
    pub bucket: String,

    /// Restrict the summary to a key prefix
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
struct DuOutput {
    bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    total_objects: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

/// Execute the du command
pub async fn execute(args: DuArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway
        .list_objects(&args.bucket, args.prefix.as_deref())
        .await
    {
        Ok(listing) => {
            let total_size = listing.total_size();
            let human = humansize::format_size(total_size, humansize::BINARY);

            if formatter.is_json() {
                formatter.json(&DuOutput {
                    bucket: args.bucket.clone(),
                    prefix: args.prefix.clone(),
                    total_objects: listing.len(),
                    total_size_bytes: total_size,
                    total_size_human: human,
                });
            } else {
                formatter.println(&format!(
                    "{human} ({total_size} bytes, {} objects) {}",
                    listing.len(),
                    args.bucket
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
