//! diff command - Show differences between two buckets
//!
//! Lists both buckets once and compares the snapshots. Differences are
//! reported on stdout; the exit code stays 0 whenever both listings were
//! obtained, so scripts use --json to detect drift.

use clap::Args;
use obc_core::{diff, DiffResult, ObjectStore as _};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Show differences between two buckets
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Source bucket
    pub bucket1: String,

    /// Destination bucket
    pub bucket2: String,
}

#[derive(Debug, Serialize)]
struct DiffOutput {
    source: String,
    dest: String,
    #[serde(flatten)]
    result: DiffResult,
    differences: usize,
}

/// Execute the diff command
pub async fn execute(args: DiffArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let source = match gateway.list_objects(&args.bucket1, None).await {
        Ok(l) => l,
        Err(e) => return fail(&formatter, &e),
    };

    let dest = match gateway.list_objects(&args.bucket2, None).await {
        Ok(l) => l,
        Err(e) => return fail(&formatter, &e),
    };

    let result = diff(&source, &dest);

    if formatter.is_json() {
        formatter.json(&DiffOutput {
            source: args.bucket1.clone(),
            dest: args.bucket2.clone(),
            differences: result.len(),
            result,
        });
    } else if result.is_empty() {
        formatter.println(&format!(
            "Buckets '{}' and '{}' are identical.",
            args.bucket1, args.bucket2
        ));
    } else {
        formatter.println(&render_diff(&result, &args.bucket1, &args.bucket2));
    }

    ExitCode::Success
}

/// Render a non-empty diff as one line per difference
fn render_diff(result: &DiffResult, source: &str, dest: &str) -> String {
    let mut lines = Vec::new();

    for key in &result.only_in_source {
        lines.push(format!("only in {source}: {key}"));
    }

    for key in &result.only_in_dest {
        lines.push(format!("only in {dest}: {key}"));
    }

    for (key, (src_size, dst_size)) in &result.size_mismatch {
        lines.push(format!(
            "size differs for {key}: {source}={src_size} {dest}={dst_size}"
        ));
    }

    lines.join("\n")
}
