//! put-dir command - Upload a directory recursively
//!
//! Walks the directory tree and uploads every file, deriving keys from the
//! path relative to the directory root. Path separators are normalized to
//! '/' so keys look the same regardless of platform.

use std::path::{Path, PathBuf};

use clap::Args;
use obc_core::ObjectStore as _;
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;
use crate::output::ProgressBar;

/// Upload a directory recursively
#[derive(Args, Debug)]
pub struct PutDirArgs {
    /// Bucket name
    pub bucket: String,

    /// Local directory path
    pub dir: String,

    /// Key prefix for uploaded objects
    #[arg(long)]
    pub prefix: Option<String>,

    /// Keep uploading remaining files after a failure
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Debug, Serialize)]
struct PutDirOutput {
    status: &'static str,
    bucket: String,
    uploaded: usize,
    failed: usize,
}

/// Execute the put-dir command
pub async fn execute(args: PutDirArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    let root = Path::new(&args.dir);
    if !root.is_dir() {
        formatter.error(&format!("not a directory: {}", root.display()));
        return ExitCode::UserError;
    }

    let files = match walk_dir(root, root) {
        Ok(f) => f,
        Err(e) => {
            formatter.error(&format!("failed to read directory: {e}"));
            return ExitCode::UserError;
        }
    };

    if files.is_empty() {
        formatter.warning("no files found to upload");
        return ExitCode::Success;
    }

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let progress = ProgressBar::new(&ctx.output, files.len() as u64);
    let mut uploaded = 0;
    let mut failed = 0;
    let mut last_error: Option<ExitCode> = None;

    for (path, relative) in files {
        let key = object_key(args.prefix.as_deref(), &relative);
        progress.tick(&key);

        let data = match std::fs::read(&path) {
            Ok(d) => d,
            Err(e) => {
                formatter.error(&format!("failed to read {}: {e}", path.display()));
                failed += 1;
                last_error = Some(ExitCode::UserError);
                if args.continue_on_error {
                    continue;
                }
                break;
            }
        };

        let content_type: Option<String> = mime_guess::from_path(&path)
            .first()
            .map(|m| m.essence_str().to_string());

        match gateway
            .put_object(&args.bucket, &key, data, content_type.as_deref())
            .await
        {
            Ok(_) => uploaded += 1,
            Err(e) => {
                formatter.error(&format!("failed to upload {key}: {e}"));
                failed += 1;
                last_error = Some(ExitCode::from_error(&e));
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    progress.finish_and_clear();

    if formatter.is_json() {
        formatter.json(&PutDirOutput {
            status: if failed == 0 { "success" } else { "partial" },
            bucket: args.bucket.clone(),
            uploaded,
            failed,
        });
    } else if failed > 0 {
        formatter.warning(&format!(
            "completed with errors: {uploaded} uploaded, {failed} failed"
        ));
    } else {
        formatter.success(&format!("Uploaded {uploaded} file(s)."));
    }

    match last_error {
        Some(code) => code,
        None => ExitCode::Success,
    }
}

/// Collect every file under `dir` with its path relative to `base`
fn walk_dir(dir: &Path, base: &Path) -> std::io::Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            files.push((path.clone(), relative.to_string_lossy().to_string()));
        } else if path.is_dir() {
            files.extend(walk_dir(&path, base)?);
        }
    }
    files.sort();
    Ok(files)
}

fn object_key(prefix: Option<&str>, relative: &str) -> String {
    let key = relative.replace('\\', "/");
    match prefix {
        None => key,
        Some(p) => format!("{}/{key}", p.trim_end_matches('/')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_object_key_without_prefix() {
        assert_eq!(object_key(None, "sub/file.txt"), "sub/file.txt");
    }

    #[test]
    fn test_object_key_with_prefix() {
        assert_eq!(object_key(Some("backup"), "file.txt"), "backup/file.txt");
        assert_eq!(object_key(Some("backup/"), "file.txt"), "backup/file.txt");
    }

    #[test]
    fn test_object_key_normalizes_separators() {
        assert_eq!(object_key(None, "sub\\file.txt"), "sub/file.txt");
    }

    #[test]
    fn test_walk_dir_collects_nested_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("a/b")).unwrap();
        std::fs::write(temp.path().join("top.txt"), "x").unwrap();
        std::fs::write(temp.path().join("a/mid.txt"), "x").unwrap();
        std::fs::write(temp.path().join("a/b/deep.txt"), "x").unwrap();

        let files = walk_dir(temp.path(), temp.path()).unwrap();
        let relatives: Vec<&str> = files.iter().map(|(_, r)| r.as_str()).collect();
        assert_eq!(relatives, vec!["a/b/deep.txt", "a/mid.txt", "top.txt"]);
    }
}
