//! encrypt command - Encrypt a file for a recipient
//!
//! Delegates to the external encryption tool; with --upload the ciphertext
//! is stored in the given bucket afterwards. The plaintext never leaves the
//! local machine.

use std::path::PathBuf;

use clap::Args;
use obc_core::{Cryptor, ObjectStore as _};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Encrypt a file for a recipient
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// File to encrypt
    pub file: PathBuf,

    /// Recipient identity known to the encryption tool
    pub recipient: String,

    /// Output path (defaults to the input path with a .gpg suffix)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Upload the ciphertext after encrypting
    #[arg(long, requires = "bucket")]
    pub upload: bool,

    /// Bucket for --upload
    #[arg(long)]
    pub bucket: Option<String>,
}

#[derive(Debug, Serialize)]
struct EncryptOutput {
    status: &'static str,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uploaded_to: Option<String>,
}

/// Execute the encrypt command
pub async fn execute(args: EncryptArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    if !args.file.is_file() {
        formatter.error(&format!("file not found: {}", args.file.display()));
        return ExitCode::UserError;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| ciphertext_path(&args.file));

    if let Err(e) = Cryptor::default().encrypt_file(&args.file, &output, &args.recipient) {
        return fail(&formatter, &e);
    }

    let mut uploaded_to = None;

    if args.upload {
        // clap enforces --bucket alongside --upload
        let bucket = args.bucket.as_deref().unwrap_or_default();

        let key = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let data = match std::fs::read(&output) {
            Ok(d) => d,
            Err(e) => return fail(&formatter, &e.into()),
        };

        let gateway = match ctx.gateway().await {
            Ok(g) => g,
            Err(e) => return fail(&formatter, &e),
        };

        match gateway
            .put_object(bucket, &key, data, Some("application/pgp-encrypted"))
            .await
        {
            Ok(_) => uploaded_to = Some(format!("{bucket}/{key}")),
            Err(e) => return fail(&formatter, &e),
        }
    }

    if formatter.is_json() {
        formatter.json(&EncryptOutput {
            status: "success",
            output: output.display().to_string(),
            uploaded_to,
        });
    } else {
        formatter.success(&format!("Encrypted to {}", output.display()));
        if let Some(target) = &uploaded_to {
            formatter.success(&format!("Uploaded to {target}"));
        }
    }

    ExitCode::Success
}

/// Default ciphertext path: the input path with ".gpg" appended
fn ciphertext_path(input: &std::path::Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".gpg");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ciphertext_path_appends_suffix() {
        let path = ciphertext_path(std::path::Path::new("/tmp/report.pdf"));
        assert_eq!(path, PathBuf::from("/tmp/report.pdf.gpg"));
    }

    #[test]
    fn test_upload_requires_bucket() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: EncryptArgs,
        }

        assert!(Wrapper::try_parse_from(["x", "file.txt", "alice", "--upload"]).is_err());
        assert!(Wrapper::try_parse_from([
            "x", "file.txt", "alice", "--upload", "--bucket", "vault"
        ])
        .is_ok());
    }
}
