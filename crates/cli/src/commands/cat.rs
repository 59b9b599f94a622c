//! cat command - Display object contents
//!
//! Writes the raw object bytes to stdout, bypassing the formatter so binary
//! content survives.

use std::io::{self, Write};

use clap::Args;
use obc_core::ObjectStore as _;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Display object contents
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub object: String,
}

/// Execute the cat command
pub async fn execute(args: CatArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway.get_object(&args.bucket, &args.object).await {
        Ok(data) => {
            if let Err(e) = io::stdout().write_all(&data) {
                formatter.error(&format!("failed to write to stdout: {e}"));
                return ExitCode::UserError;
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
