//! Picvault API Server
//!
//! Main entry point for the Picvault image service.

use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use picvault_api::{AppState, create_router};
use picvault_core::storage::{StorageConfig, StorageProvider, StorageService};
use picvault_db::{connect_with, migrate};
use picvault_shared::{AppConfig, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picvault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    migrate(&db).await?;
    info!("Connected to database");

    let storage = StorageService::from_config(storage_config(&config.storage)?)?;
    info!(
        provider = storage.provider_name(),
        download_ttl_secs = config.storage.download_ttl_secs,
        "Object storage configured"
    );

    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
        max_upload_bytes: config.server.max_upload_bytes,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map the raw `storage` config section onto a provider.
fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::S3 {
            endpoint: settings.endpoint.clone(),
            bucket: settings.bucket.clone(),
            access_key_id: settings.access_key_id.clone(),
            secret_access_key: settings.secret_access_key.clone(),
            region: settings.region.clone(),
        },
        "fs" | "local" => StorageProvider::local_fs(&settings.root),
        "memory" => StorageProvider::Memory,
        other => bail!("unknown storage provider '{other}'"),
    };

    Ok(StorageConfig::new(provider).with_download_ttl(settings.download_ttl_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_providers() {
        let mut settings = StorageSettings::default();
        let config = storage_config(&settings).expect("fs provider");
        assert_eq!(config.provider.name(), "local");
        assert_eq!(config.presign_download_ttl_secs, 3600);

        settings.provider = "s3".to_string();
        settings.download_ttl_secs = 60;
        let config = storage_config(&settings).expect("s3 provider");
        assert_eq!(config.provider.bucket(), "images");
        assert_eq!(config.presign_download_ttl_secs, 60);

        settings.provider = "ftp".to_string();
        assert!(storage_config(&settings).is_err());
    }
}
