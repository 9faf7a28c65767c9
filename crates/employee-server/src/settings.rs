//! Server settings
//!
//! Precedence (lowest to highest):
//! 1. Built-in defaults
//! 2. `employee-server.{toml,yaml,json}` in the working directory (optional)
//! 3. Environment variables (`EMPLOYEE_*` prefix)

use config::{Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "employee-server";
const ENV_PREFIX: &str = "EMPLOYEE";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "./data";
const DATABASE_FILE_NAME: &str = "employees.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("cache_ttl_secs must be at least 1 when set")]
    ZeroCacheTtl,
}

/// Values as they come out of the layered sources
#[derive(Debug, Deserialize)]
struct RawConfig {
    bind_address: String,
    data_dir: PathBuf,
    database_path: Option<String>,
    cache_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub data_dir: PathBuf,
    pub database_path: String,
    /// `None` keeps cache entries until they are evicted
    pub cache_ttl: Option<Duration>,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let bind_address = raw
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(raw.bind_address.clone()))?;

        let database_path = match raw.database_path {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::EmptyDatabasePath),
            Some(path) => path,
            None => raw
                .data_dir
                .join(DATABASE_FILE_NAME)
                .to_string_lossy()
                .to_string(),
        };

        let cache_ttl = match raw.cache_ttl_secs {
            Some(0) => return Err(ConfigError::ZeroCacheTtl),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            bind_address,
            data_dir: raw.data_dir,
            database_path,
            cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_with(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_env(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    #[test]
    fn defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(
            PathBuf::from(&config.database_path),
            PathBuf::from("./data").join("employees.db")
        );
        assert_eq!(config.cache_ttl, None);
    }

    #[test]
    fn environment_overrides() {
        let config = load_with(&[
            ("EMPLOYEE_BIND_ADDRESS", "127.0.0.1:9000"),
            ("EMPLOYEE_DATABASE_PATH", "/tmp/staff.db"),
            ("EMPLOYEE_CACHE_TTL_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.database_path, "/tmp/staff.db");
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(30)));
    }

    #[test]
    fn database_path_follows_data_dir() {
        let config = load_with(&[("EMPLOYEE_DATA_DIR", "/var/lib/employees")]).unwrap();
        assert_eq!(
            PathBuf::from(&config.database_path),
            PathBuf::from("/var/lib/employees/employees.db")
        );
    }

    #[test]
    fn rejects_bad_bind_address() {
        let err = load_with(&[("EMPLOYEE_BIND_ADDRESS", "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddress(_)));
    }

    #[test]
    fn rejects_zero_ttl() {
        let err = load_with(&[("EMPLOYEE_CACHE_TTL_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCacheTtl));
    }

    #[test]
    fn rejects_empty_database_path() {
        let err = load_with(&[("EMPLOYEE_DATABASE_PATH", " ")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDatabasePath));
    }
}
