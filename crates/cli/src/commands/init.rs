//! init command - Write the endpoint configuration
//!
//! Stores endpoint URL and credentials in the config file. Validation runs
//! before anything is written, so a bad URL or api value never lands on
//! disk.

use clap::Args;
use obc_core::Config;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Write the endpoint configuration file
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Endpoint URL (e.g., "http://localhost:9000"); the scheme selects TLS
    pub url: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// API signature version: s3v4 or s3v2
    #[arg(long)]
    pub api: Option<String>,

    /// Region sent to the backend
    #[arg(long, default_value = "us-east-1")]
    pub region: String,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    status: &'static str,
    path: String,
}

/// Execute the init command
pub async fn execute(args: InitArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let mut config = Config::new(&args.url, &args.access_key, &args.secret_key);
    config.api = args.api;
    config.region = args.region;

    let manager = match ctx.config_manager() {
        Ok(m) => m,
        Err(e) => return fail(&formatter, &e),
    };

    match manager.save(&config) {
        Ok(()) => {
            let path = manager.config_path().display().to_string();
            if formatter.is_json() {
                formatter.json(&InitOutput {
                    status: "success",
                    path,
                });
            } else {
                formatter.success(&format!("Configuration written to {path}"));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
