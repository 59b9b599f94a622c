//! head command - Display first N lines of an object

use std::io::{self, Write};

use clap::Args;
use obc_core::ObjectStore as _;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Display first N lines of an object
#[derive(Args, Debug)]
pub struct HeadArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub object: String,

    /// Number of lines to display
    #[arg(short = 'n', long, default_value = "10")]
    pub lines: usize,
}

/// Execute the head command
pub async fn execute(args: HeadArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    match gateway.get_object(&args.bucket, &args.object).await {
        Ok(data) => {
            let text = String::from_utf8_lossy(&data);
            let head = first_lines(&text, args.lines);
            if let Err(e) = io::stdout().write_all(head.as_bytes()) {
                formatter.error(&format!("failed to write to stdout: {e}"));
                return ExitCode::UserError;
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}

fn first_lines(text: &str, count: usize) -> String {
    let mut out = String::new();
    for line in text.lines().take(count) {
        out.push_str(line);
        out.push('\n');
    }
    out
}
