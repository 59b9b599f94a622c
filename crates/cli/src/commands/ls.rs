//! ls command - List objects in a bucket

use clap::Args;
use obc_core::{ObjectRecord, ObjectStore as _};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// List objects in a bucket
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Bucket name
    pub bucket: String,

    /// Restrict the listing to a key prefix
    pub prefix: Option<String>,

    /// Show totals after the listing
    #[arg(long)]
    pub summarize: bool,
}

#[derive(Debug, Serialize)]
struct LsOutput {
    bucket: String,
    objects: Vec<ObjectRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let listing = match gateway
        .list_objects(&args.bucket, args.prefix.as_deref())
        .await
    {
        Ok(l) => l,
        Err(e) => return fail(&formatter, &e),
    };

    let total_objects = listing.len();
    let total_size = listing.total_size();

    if formatter.is_json() {
        let output = LsOutput {
            bucket: args.bucket.clone(),
            objects: listing.records().cloned().collect(),
            summary: args.summarize.then(|| Summary {
                total_objects,
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(total_size, humansize::BINARY),
            }),
        };
        formatter.json(&output);
    } else {
        for record in listing.records() {
            formatter.println(&render_record(record));
        }

        if args.summarize {
            formatter.println(&format!(
                "\nTotal: {} objects, {}",
                total_objects,
                humansize::format_size(total_size, humansize::BINARY)
            ));
        }
    }

    ExitCode::Success
}

fn render_record(record: &ObjectRecord) -> String {
    let date = record
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "                   ".to_string());
    format!("[{date}] {:>10} {}", record.size_human(), record.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_record_without_date() {
        let record = ObjectRecord::new("docs/report.txt", 4096);
        let line = render_record(&record);
        assert!(line.contains("4 KiB"));
        assert!(line.ends_with("docs/report.txt"));
    }

    #[test]
    fn test_render_record_with_date() {
        let mut record = ObjectRecord::new("a.txt", 1);
        record.last_modified = jiff::Timestamp::from_second(1_700_000_000).ok();
        let line = render_record(&record);
        assert!(line.starts_with("[2023-11-14"));
    }
}
