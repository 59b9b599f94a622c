//! find command - Search for objects

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Search for objects by prefix and name pattern
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Bucket name
    pub bucket: String,

    /// Key prefix to search under
    pub prefix: Option<String>,

    /// Glob pattern matched against the final key segment (e.g., "*.txt")
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
struct FindOutput {
    bucket: String,
    matches: Vec<String>,
    total: usize,
}

/// Execute the find command
pub async fn execute(args: FindArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let pattern = match args.name.as_deref().map(glob::Pattern::new).transpose() {
        Ok(p) => p,
        Err(e) => {
            formatter.error(&format!("invalid name pattern: {e}"));
            return ExitCode::UserError;
        }
    };

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway
        .list_objects(&args.bucket, args.prefix.as_deref())
        .await
    {
        Ok(listing) => {
            let matches: Vec<String> = listing
                .keys()
                .filter(|key| matches_name(key, pattern.as_ref()))
                .map(str::to_string)
                .collect();

            if formatter.is_json() {
                formatter.json(&FindOutput {
                    bucket: args.bucket.clone(),
                    total: matches.len(),
                    matches,
                });
            } else {
                for key in &matches {
                    formatter.println(key);
                }
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}

/// Match the pattern against the final path segment of the key
fn matches_name(key: &str, pattern: Option<&glob::Pattern>) -> bool {
    match pattern {
        None => true,
        Some(p) => {
            let name = key.rsplit('/').next().unwrap_or(key);
            p.matches(name)
        }
    }
}
