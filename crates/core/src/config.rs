//! Configuration management
//!
//! Loads and saves the obc endpoint configuration, stored in TOML format at
//! ~/.config/obc/config.toml by default. A missing or invalid file is a
//! fatal startup error for the CLI; no network activity happens before the
//! configuration has been validated.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Signature versions accepted for the `api` field
const API_VERSIONS: &[&str] = &["s3v4", "s3v2"];

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Retry configuration handed to the transport client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff duration in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    10000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

/// Timeout configuration handed to the transport client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            read_ms: default_read_timeout(),
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }
}

/// Endpoint configuration for an S3-compatible service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint URL; the scheme selects TLS
    pub url: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// API signature version ("s3v4" or "s3v2"); validated but unused downstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,

    /// Region sent to the backend
    #[serde(default = "default_region")]
    pub region: String,

    /// Timeout configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,

    /// Retry configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,
}

impl Config {
    /// Create a new configuration with required fields
    pub fn new(
        url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            api: None,
            region: default_region(),
            timeout: None,
            retry: None,
        }
    }

    /// Validate field contents
    ///
    /// Rejects unparsable URLs, non-http(s) schemes, empty credentials, and
    /// unknown `api` values.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.url)?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "unsupported URL scheme '{other}' in endpoint '{}'",
                    self.url
                )));
            }
        }

        if self.access_key.is_empty() {
            return Err(Error::Config("access_key cannot be empty".into()));
        }

        if self.secret_key.is_empty() {
            return Err(Error::Config("secret_key cannot be empty".into()));
        }

        if let Some(api) = &self.api {
            if !API_VERSIONS.contains(&api.as_str()) {
                return Err(Error::Config(format!(
                    "unknown api version '{api}' (expected one of: {})",
                    API_VERSIONS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Whether the endpoint uses TLS
    pub fn is_tls(&self) -> bool {
        self.url.starts_with("https://")
    }

    /// Effective retry configuration
    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    /// Effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }
}

/// Configuration manager handles loading and saving the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("could not determine config directory".into()))?;
        let config_path = config_dir.join("obc").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load and validate the configuration from disk
    ///
    /// A missing file is an error: obc has no usable defaults without
    /// endpoint and credentials. Run `obc init` to create one.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "configuration file not found: {} (run 'obc init' to create it)",
                self.config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        // Credentials live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_config_new_defaults() {
        let config = Config::new("http://localhost:9000", "access", "secret");
        assert_eq!(config.region, "us-east-1");
        assert!(config.api.is_none());
        assert!(!config.is_tls());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tls_detection() {
        let config = Config::new("https://s3.example.com", "a", "b");
        assert!(config.is_tls());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = Config::new("ftp://localhost:9000", "a", "b");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unparsable_url() {
        let config = Config::new("not a url", "a", "b");
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let config = Config::new("http://localhost:9000", "", "secret");
        assert!(config.validate().is_err());

        let config = Config::new("http://localhost:9000", "access", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_api_versions() {
        let mut config = Config::new("http://localhost:9000", "a", "b");
        config.api = Some("s3v4".into());
        assert!(config.validate().is_ok());

        config.api = Some("s3v2".into());
        assert!(config.validate().is_ok());

        config.api = Some("v5".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let (manager, _temp_dir) = temp_config_manager();
        let result = manager.load();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::new("http://localhost:9000", "minioadmin", "minioadmin");
        config.api = Some("s3v4".into());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.url, "http://localhost:9000");
        assert_eq!(loaded.access_key, "minioadmin");
        assert_eq!(loaded.api.as_deref(), Some("s3v4"));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "url = [not toml").unwrap();
        assert!(matches!(manager.load(), Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "url = \"http://localhost:9000\"\naccess_key = \"\"\nsecret_key = \"s\"\n",
        )
        .unwrap();
        assert!(matches!(manager.load(), Err(Error::Config(_))));
    }

    #[test]
    fn test_timeout_and_retry_defaults() {
        let config = Config::new("http://localhost:9000", "a", "b");
        let timeout = config.timeout_config();
        assert_eq!(timeout.connect(), Duration::from_millis(5000));
        assert_eq!(timeout.read(), Duration::from_millis(30000));

        let retry = config.retry_config();
        assert_eq!(retry.max_attempts, 3);
    }

    #[test]
    fn test_timeout_and_retry_from_file() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
url = "http://localhost:9000"
access_key = "a"
secret_key = "b"

[timeout]
connect_ms = 1000
read_ms = 2000

[retry]
max_attempts = 5
"#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.timeout_config().connect_ms, 1000);
        assert_eq!(config.timeout_config().read_ms, 2000);
        assert_eq!(config.retry_config().max_attempts, 5);
        assert_eq!(config.retry_config().initial_backoff_ms, 100);
    }
}
