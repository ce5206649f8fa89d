//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size for uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Raw object storage settings.
///
/// `provider` selects which of the remaining fields are read:
/// `s3` uses endpoint/bucket/region/credentials, `fs` uses `root`,
/// `memory` uses nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider name: `s3`, `fs` or `memory`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket name (S3).
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Endpoint URL (S3).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Region (S3).
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID (S3).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key (S3).
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Root directory (fs).
    #[serde(default = "default_root")]
    pub root: String,
    /// Lifetime of presigned download URLs.
    #[serde(default = "default_download_ttl")]
    pub download_ttl_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bucket: default_bucket(),
            endpoint: None,
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
            root: default_root(),
            download_ttl_secs: default_download_ttl(),
        }
    }
}

fn default_provider() -> String {
    "fs".to_string()
}

fn default_bucket() -> String {
    "images".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_root() -> String {
    "./storage".to_string()
}

fn default_download_ttl() -> u64 {
    3600 // 1 hour
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PICVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("PICVAULT__DATABASE__URL", Some("sqlite::memory:")),
                ("PICVAULT__SERVER__PORT", Some("9090")),
                ("PICVAULT__STORAGE__PROVIDER", Some("memory")),
                ("PICVAULT__STORAGE__DOWNLOAD_TTL_SECS", Some("120")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.storage.provider, "memory");
                assert_eq!(config.storage.download_ttl_secs, 120);
                assert_eq!(config.database.max_connections, 10);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars_unset(["PICVAULT__DATABASE__URL"], || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_storage_defaults() {
        let storage = StorageSettings::default();
        assert_eq!(storage.provider, "fs");
        assert_eq!(storage.bucket, "images");
        assert_eq!(storage.download_ttl_secs, 3600);
        assert!(storage.endpoint.is_none());
    }
}
