//! put command - Upload a local file

use std::path::Path;

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Upload a local file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Bucket name
    pub bucket: String,

    /// Local file path
    pub file: String,

    /// Object key (defaults to the file name)
    pub key: Option<String>,

    /// Content type (guessed from the file name if omitted)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    bucket: String,
    key: String,
    size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let path = Path::new(&args.file);
    let key = match object_key(path, args.key.as_deref()) {
        Ok(k) => k,
        Err(message) => {
            formatter.error(&message);
            return ExitCode::UserError;
        }
    };

    if path.is_dir() {
        formatter.error("source is a directory; use 'obc put-dir' for directories");
        return ExitCode::UserError;
    }

    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) => {
            formatter.error(&format!("failed to read {}: {e}", path.display()));
            return ExitCode::UserError;
        }
    };

    let guessed: Option<String> = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());
    let content_type = args.content_type.as_deref().or(guessed.as_deref());

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway
        .put_object(&args.bucket, &key, data, content_type)
        .await
    {
        Ok(record) => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "success",
                    bucket: args.bucket.clone(),
                    key,
                    size_bytes: record.size,
                    etag: record.etag,
                });
            } else {
                formatter.println(&format!(
                    "{} -> {}/{} ({})",
                    args.file,
                    args.bucket,
                    key,
                    record.size_human()
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}

/// Choose the destination key: explicit key wins, else the file name
fn object_key(path: &Path, explicit: Option<&str>) -> Result<String, String> {
    if let Some(key) = explicit {
        if key.is_empty() {
            return Err("object key cannot be empty".to_string());
        }
        return Ok(key.to_string());
    }

    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| format!("cannot derive object key from '{}'", path.display()))
}
