//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, MinIO
    S3 {
        /// Custom endpoint URL; `None` means AWS.
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID; `None` falls back to the ambient AWS credential chain.
        access_key_id: Option<String>,
        /// Secret access key.
        secret_access_key: Option<String>,
        /// AWS region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory store (tests only)
    Memory,
}

impl StorageProvider {
    /// Create S3 provider with static credentials.
    #[must_use]
    pub fn s3(
        endpoint: Option<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint,
            bucket: bucket.into(),
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name, or the root for local storage.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }

    /// Location reference for an object, recorded alongside its metadata.
    ///
    /// This is a stable address, not a credential: reading it still needs
    /// a presigned URL or bucket access.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        match self {
            Self::S3 {
                endpoint: Some(endpoint),
                bucket,
                ..
            } => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
            Self::S3 {
                endpoint: None,
                bucket,
                ..
            } => format!("https://{bucket}.s3.amazonaws.com/{key}"),
            Self::LocalFs { root } => {
                format!("file://{}/{key}", root.display().to_string().trim_end_matches('/'))
            }
            Self::Memory => format!("memory:///{key}"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned download URL TTL in seconds (default: 3600 = 1 hour).
    pub presign_download_ttl_secs: u64,
    /// Content type recorded on written objects.
    pub content_type: String,
}

impl StorageConfig {
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;
    /// Default content type for stored images.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "image/jpeg";

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
            content_type: Self::DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }

    /// Set the content type recorded on written objects.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3(
            Some("https://account.r2.cloudflarestorage.com/".to_string()),
            "images",
            "access_key",
            "secret_key",
            "auto",
        );
        assert_eq!(provider.name(), "s3");
        assert_eq!(provider.bucket(), "images");
        assert_eq!(
            provider.object_url("abc.jpg"),
            "https://account.r2.cloudflarestorage.com/images/abc.jpg"
        );
    }

    #[test]
    fn test_storage_provider_s3_default_endpoint() {
        let provider = StorageProvider::s3(None, "images", "ak", "sk", "ap-south-1");
        assert_eq!(
            provider.object_url("abc.jpg"),
            "https://images.s3.amazonaws.com/abc.jpg"
        );
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./storage");
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.object_url("abc.jpg"), "file://./storage/abc.jpg");
    }

    #[test]
    fn test_storage_provider_memory() {
        assert_eq!(StorageProvider::Memory.name(), "memory");
        assert_eq!(
            StorageProvider::Memory.object_url("abc.jpg"),
            "memory:///abc.jpg"
        );
    }

    #[test]
    fn test_storage_provider_deserialize() {
        let provider: StorageProvider =
            serde_json::from_str(r#"{"type":"local_fs","root":"/var/images"}"#)
                .expect("valid provider json");
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::Memory);
        assert_eq!(
            config.presign_download_ttl_secs,
            StorageConfig::DEFAULT_DOWNLOAD_TTL
        );
        assert_eq!(config.content_type, "image/jpeg");

        let config = config.with_download_ttl(60).with_content_type("image/png");
        assert_eq!(config.presign_download_ttl_secs, 60);
        assert_eq!(config.content_type, "image/png");
    }
}
