//! Error types for obc-core
//!
//! Every gateway and engine boundary returns these typed errors; converting
//! them into messages and process exit codes is the CLI's job alone.

use thiserror::Error;

/// Result type alias for obc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for obc-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error (missing, malformed, or failed validation)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network, authentication, or backend failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Bucket or object does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Bucket already exists on create, or is not empty on delete
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid argument or path
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Encryption or decryption failure
    #[error("crypto error: {0}")]
    Crypto(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Get the process exit code for this error
    ///
    /// Contract: 0 success, 1 user error, 2 transport/remote error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Transport(_) => 2,
            _ => 1,
        }
    }
}
