//! decrypt command - Decrypt a file

use std::path::PathBuf;

use clap::Args;
use obc_core::Cryptor;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Decrypt a file
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// File to decrypt
    pub file: PathBuf,

    /// Output path for the plaintext
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
struct DecryptOutput {
    status: &'static str,
    output: String,
}

/// Execute the decrypt command
pub async fn execute(args: DecryptArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    if !args.file.is_file() {
        formatter.error(&format!("file not found: {}", args.file.display()));
        return ExitCode::UserError;
    }

    match Cryptor::default().decrypt_file(&args.file, &args.output) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&DecryptOutput {
                    status: "success",
                    output: args.output.display().to_string(),
                });
            } else {
                formatter.success(&format!("Decrypted to {}", args.output.display()));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &e),
    }
}
