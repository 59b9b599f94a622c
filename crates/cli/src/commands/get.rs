//! get command - Download an object to a local file

use std::path::Path;

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub object: String,

    /// Local file path to write
    pub file: String,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    status: &'static str,
    bucket: String,
    object: String,
    file: String,
    size_bytes: u64,
}

/// Execute the get command
pub async fn execute(args: GetArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let data = match gateway.get_object(&args.bucket, &args.object).await {
        Ok(d) => d,
        Err(e) => return fail(&formatter, &e),
    };

    let size = data.len() as u64;
    let path = Path::new(&args.file);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return fail(&formatter, &e.into());
            }
        }
    }

    if let Err(e) = std::fs::write(path, &data) {
        return fail(&formatter, &e.into());
    }

    if formatter.is_json() {
        formatter.json(&GetOutput {
            status: "success",
            bucket: args.bucket.clone(),
            object: args.object.clone(),
            file: args.file.clone(),
            size_bytes: size,
        });
    } else {
        formatter.println(&format!(
            "{}/{} -> {} ({})",
            args.bucket,
            args.object,
            args.file,
            humansize::format_size(size, humansize::BINARY)
        ));
    }

    ExitCode::Success
}
