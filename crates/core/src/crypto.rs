//! External-tool file encryption
//!
//! Wraps an external OpenPGP implementation (gpg by default) for
//! recipient-keyed file encryption and decryption. The cryptographic format
//! is owned entirely by the tool; this module only guarantees scoped,
//! all-or-nothing file operations: on any failure the partially written
//! output is removed before the error is returned.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Default encryption tool
const DEFAULT_PROGRAM: &str = "gpg";

/// Handle to the external encryption tool
#[derive(Debug, Clone)]
pub struct Cryptor {
    program: PathBuf,
}

impl Default for Cryptor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Cryptor {
    /// Create a Cryptor using the given tool binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Encrypt `input` to `output` for the given recipient identity
    pub fn encrypt_file(&self, input: &Path, output: &Path, recipient: &str) -> Result<()> {
        if recipient.is_empty() {
            return Err(Error::Validation("recipient cannot be empty".into()));
        }

        self.run_scoped(output, |cmd| {
            cmd.arg("--batch")
                .arg("--yes")
                .arg("--trust-model")
                .arg("always")
                .arg("--recipient")
                .arg(recipient)
                .arg("--output")
                .arg(output)
                .arg("--encrypt")
                .arg(input);
        })
    }

    /// Decrypt `input` to `output`
    pub fn decrypt_file(&self, input: &Path, output: &Path) -> Result<()> {
        self.run_scoped(output, |cmd| {
            cmd.arg("--batch")
                .arg("--yes")
                .arg("--output")
                .arg(output)
                .arg("--decrypt")
                .arg(input);
        })
    }

    /// Run the tool, removing any partial output on failure
    fn run_scoped(&self, output: &Path, configure: impl FnOnce(&mut Command)) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        configure(&mut cmd);

        tracing::debug!(program = %self.program.display(), "running encryption tool");

        let result = cmd.output().map_err(|e| {
            Error::Crypto(format!(
                "failed to run '{}': {e}",
                self.program.display()
            ))
        });

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                remove_partial_output(output);
                let stderr = String::from_utf8_lossy(&out.stderr);
                let code = out.status.code().unwrap_or(-1);
                Err(Error::Crypto(format!(
                    "'{}' exited with status {code}: {}",
                    self.program.display(),
                    stderr.trim()
                )))
            }
            Err(e) => {
                remove_partial_output(output);
                Err(e)
            }
        }
    }
}

fn remove_partial_output(output: &Path) {
    if output.exists() {
        if let Err(e) = std::fs::remove_file(output) {
            tracing::warn!(path = %output.display(), "failed to remove partial output: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_program_is_gpg() {
        let cryptor = Cryptor::default();
        assert_eq!(cryptor.program, PathBuf::from("gpg"));
    }

    #[test]
    fn test_empty_recipient_rejected() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.txt");
        let output = temp.path().join("out.gpg");
        std::fs::write(&input, "secret").unwrap();

        let result = Cryptor::default().encrypt_file(&input, &output, "");
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_tool_reports_crypto_error() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.txt");
        let output = temp.path().join("out.gpg");
        std::fs::write(&input, "secret").unwrap();

        let cryptor = Cryptor::new("/nonexistent/encryption-tool");
        let result = cryptor.encrypt_file(&input, &output, "alice@example.com");
        assert!(matches!(result, Err(Error::Crypto(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_tool_failure_removes_partial_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.txt");
        let output = temp.path().join("out.gpg");
        std::fs::write(&input, "secret").unwrap();

        // Simulate the tool dying after writing part of the output
        std::fs::write(&output, "partial").unwrap();

        let cryptor = Cryptor::new("false");
        let result = cryptor.encrypt_file(&input, &output, "alice@example.com");
        assert!(matches!(result, Err(Error::Crypto(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_decrypt_failure_removes_partial_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.gpg");
        let output = temp.path().join("out.txt");
        std::fs::write(&input, "ciphertext").unwrap();
        std::fs::write(&output, "partial").unwrap();

        let cryptor = Cryptor::new("false");
        let result = cryptor.decrypt_file(&input, &output);
        assert!(matches!(result, Err(Error::Crypto(_))));
        assert!(!output.exists());
    }
}
