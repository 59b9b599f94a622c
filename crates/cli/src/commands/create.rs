//! create command - Make a bucket

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Create a bucket
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Bucket name
    pub bucket: String,

    /// Ignore error if the bucket already exists
    #[arg(short = 'p', long)]
    pub ignore_existing: bool,
}

#[derive(Debug, Serialize)]
struct CreateOutput {
    status: &'static str,
    bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the create command
pub async fn execute(args: CreateArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway.create_bucket(&args.bucket).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&CreateOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    message: None,
                });
            } else {
                formatter.success(&format!("Bucket '{}' created.", args.bucket));
            }
            ExitCode::Success
        }
        Err(obc_core::Error::Conflict(_)) if args.ignore_existing => {
            if formatter.is_json() {
                formatter.json(&CreateOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    message: Some("bucket already exists".to_string()),
                });
            } else {
                formatter.success(&format!("Bucket '{}' already exists.", args.bucket));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
