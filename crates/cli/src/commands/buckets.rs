//! buckets command - List all buckets

use clap::Args;
use obc_core::{BucketInfo, ObjectStore as _};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// List all buckets
#[derive(Args, Debug)]
pub struct BucketsArgs {}

#[derive(Debug, Serialize)]
struct BucketsOutput {
    buckets: Vec<BucketInfo>,
    total: usize,
}

/// Execute the buckets command
pub async fn execute(_args: BucketsArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway.list_buckets().await {
        Ok(buckets) => {
            if formatter.is_json() {
                formatter.json(&BucketsOutput {
                    total: buckets.len(),
                    buckets,
                });
            } else {
                for bucket in &buckets {
                    let date = bucket
                        .created
                        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "                   ".to_string());
                    formatter.println(&format!("[{date}] {}", bucket.name));
                }
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
