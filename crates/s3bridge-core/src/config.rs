//! Configuration module
//!
//! Settings are read from an optional YAML file (`config.yaml` in the working directory, or the
//! path in `CONFIG_FILE`) and then overridden by environment variables. A `.env` file is loaded
//! first when present. Storage credentials are validated eagerly so that an incomplete
//! configuration stops the process before the storage client is built.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8080;
const STORAGE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("failed to read the config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to unmarshal the config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} must be a valid number")]
    InvalidNumber(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Console output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "pretty" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid(format!("Invalid log format: {}", s))),
        }
    }
}

/// On-disk configuration file shape.
///
/// ```yaml
/// aws_config:
///   aws_key: AKIA...
///   aws_secret: ...
///   aws_region: eu-west-1
///   aws_bucket: optional-default-bucket
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub aws_config: FileAwsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileAwsConfig {
    pub aws_key: Option<String>,
    pub aws_secret: Option<String>,
    pub aws_region: Option<String>,
    pub aws_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Object storage credentials and location.
///
/// The bucket is optional: every request names its own bucket.
#[derive(Clone, Default)]
pub struct AwsConfig {
    pub key: String,
    pub secret: String,
    pub region: String,
    pub bucket: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, ...)
    pub endpoint: Option<String>,
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl AwsConfig {
    /// Checks that all required credential fields are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::Missing("aws_key"));
        }
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Missing("aws_secret"));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::Missing("aws_region"));
        }
        Ok(())
    }
}

/// Process-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub aws: AwsConfig,
    pub storage_backend: StorageBackend,
    pub storage_timeout_secs: u64,
}

impl Config {
    /// Load configuration from `.env`, the optional YAML file and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = match env::var("CONFIG_FILE") {
            Ok(path) => FileConfig::from_path(Path::new(&path))?,
            Err(_) => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    FileConfig::from_path(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::from_sources(file, |name| env::var(name).ok())
    }

    /// Build configuration from a parsed file and a variable lookup.
    ///
    /// Variables returned by `lookup` take precedence over file values; blank values count as
    /// unset.
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let file_aws = file.aws_config;

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());
        let is_production = is_production_name(&environment);

        let log_format = match var("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None if is_production => LogFormat::Json,
            None => LogFormat::Compact,
        };

        let server_port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT"))?,
            None => SERVER_PORT,
        };

        let storage_timeout_secs = match var("STORAGE_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("STORAGE_TIMEOUT_SECS"))?,
            None => STORAGE_TIMEOUT_SECS,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::default(),
        };

        let aws = AwsConfig {
            key: var("AWS_KEY")
                .or_else(|| var("AWS_ACCESS_KEY_ID"))
                .or(file_aws.aws_key)
                .unwrap_or_default(),
            secret: var("AWS_SECRET")
                .or_else(|| var("AWS_SECRET_ACCESS_KEY"))
                .or(file_aws.aws_secret)
                .unwrap_or_default(),
            region: var("AWS_REGION")
                .or(file_aws.aws_region)
                .unwrap_or_default(),
            bucket: var("AWS_BUCKET")
                .or(file_aws.aws_bucket)
                .filter(|b| !b.trim().is_empty()),
            endpoint: var("S3_ENDPOINT")
                .or(file_aws.s3_endpoint)
                .filter(|e| !e.trim().is_empty()),
        };

        let config = Config {
            base: BaseConfig {
                server_port,
                environment,
                log_format,
            },
            aws,
            storage_backend,
            storage_timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aws.validate()?;

        if self.base.server_port == 0 {
            return Err(ConfigError::Invalid("PORT cannot be 0".to_string()));
        }

        if self.storage_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "STORAGE_TIMEOUT_SECS cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn aws(&self) -> &AwsConfig {
        &self.aws
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}
