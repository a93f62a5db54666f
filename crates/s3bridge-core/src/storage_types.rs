use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::config::ConfigError;

/// Storage backend types
///
/// Defined in core because configuration selects it and the storage crate reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    S3,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::Invalid(format!("Invalid storage backend: {}", s))),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends_case_insensitively() {
        assert_eq!("S3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            " memory ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = "nfs".parse::<StorageBackend>().unwrap_err();
        assert!(err.to_string().contains("nfs"));
    }
}
