//! CLI command definitions and execution
//!
//! One module per subcommand. Commands receive a `Ctx` carrying the output
//! configuration and the config-file override; they return an `ExitCode` and
//! never call `process::exit` themselves.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use obc_core::{Config, ConfigManager, Error, Result};
use obc_s3::S3Gateway;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod buckets;
mod cat;
mod completions;
mod create;
mod decrypt;
mod delete;
mod diff;
mod du;
mod encrypt;
mod find;
mod get;
mod head;
mod init;
mod ls;
mod mirror;
mod mv;
mod put;
mod put_dir;
mod rm;

/// obc - object-storage CLI client
///
/// A command-line interface for S3-compatible object storage services,
/// with bucket diffing, mirroring, and external-tool file encryption.
#[derive(Parser, Debug)]
#[command(name = "obc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "OBC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the endpoint configuration file
    Init(init::InitArgs),

    /// Create a bucket
    Create(create::CreateArgs),

    /// Delete a bucket
    Delete(delete::DeleteArgs),

    /// List all buckets
    Buckets(buckets::BucketsArgs),

    /// List objects in a bucket
    Ls(ls::LsArgs),

    /// Download an object to a local file
    Get(get::GetArgs),

    /// Display object contents
    Cat(cat::CatArgs),

    /// Display first N lines of an object
    Head(head::HeadArgs),

    /// Summarize disk usage in a bucket
    Du(du::DuArgs),

    /// Move an object within a bucket (copy + delete)
    Mv(mv::MvArgs),

    /// Upload a local file
    Put(put::PutArgs),

    /// Upload a directory recursively
    PutDir(put_dir::PutDirArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// Search for objects by prefix and name pattern
    Find(find::FindArgs),

    /// Show differences between two buckets
    Diff(diff::DiffArgs),

    /// Make a destination bucket match a source bucket
    Mirror(mirror::MirrorArgs),

    /// Encrypt a file for a recipient, optionally uploading the result
    Encrypt(encrypt::EncryptArgs),

    /// Decrypt a file
    Decrypt(decrypt::DecryptArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Per-invocation command context
pub struct Ctx {
    pub output: OutputConfig,
    pub config_path: Option<PathBuf>,
}

impl Ctx {
    /// Build the formatter for this invocation
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.output.clone())
    }

    fn config_manager(&self) -> Result<ConfigManager> {
        match &self.config_path {
            Some(path) => Ok(ConfigManager::with_path(path.clone())),
            None => ConfigManager::new(),
        }
    }

    /// Load and validate the configuration
    pub fn load_config(&self) -> Result<Config> {
        self.config_manager()?.load()
    }

    /// Load the configuration and connect the gateway
    pub async fn gateway(&self) -> Result<S3Gateway> {
        let config = self.load_config()?;
        tracing::debug!(endpoint = %config.url, "connecting gateway");
        S3Gateway::connect(&config).await
    }
}

/// Report a typed error and map it onto the exit-code contract
pub(crate) fn fail(formatter: &Formatter, err: &Error) -> ExitCode {
    formatter.error(&err.to_string());
    ExitCode::from_error(err)
}

/// Execute the parsed CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let ctx = Ctx {
        output: OutputConfig {
            json: cli.json,
            no_color: cli.no_color,
            no_progress: cli.no_progress,
            quiet: cli.quiet,
        },
        config_path: cli.config,
    };

    match cli.command {
        Commands::Init(args) => init::execute(args, &ctx).await,
        Commands::Create(args) => create::execute(args, &ctx).await,
        Commands::Delete(args) => delete::execute(args, &ctx).await,
        Commands::Buckets(args) => buckets::execute(args, &ctx).await,
        Commands::Ls(args) => ls::execute(args, &ctx).await,
        Commands::Get(args) => get::execute(args, &ctx).await,
        Commands::Cat(args) => cat::execute(args, &ctx).await,
        Commands::Head(args) => head::execute(args, &ctx).await,
        Commands::Du(args) => du::execute(args, &ctx).await,
        Commands::Mv(args) => mv::execute(args, &ctx).await,
        Commands::Put(args) => put::execute(args, &ctx).await,
        Commands::PutDir(args) => put_dir::execute(args, &ctx).await,
        Commands::Rm(args) => rm::execute(args, &ctx).await,
        Commands::Find(args) => find::execute(args, &ctx).await,
        Commands::Diff(args) => diff::execute(args, &ctx).await,
        Commands::Mirror(args) => mirror::execute(args, &ctx).await,
        Commands::Encrypt(args) => encrypt::execute(args, &ctx).await,
        Commands::Decrypt(args) => decrypt::execute(args, &ctx).await,
        Commands::Completions(args) => completions::execute(args),
    }
}
