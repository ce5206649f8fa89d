//! Object storage for image bytes using Apache OpenDAL.
//!
//! Providers:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Local filesystem (development only)
//! - In-process memory (tests)
//!
//! ```text
//! op.write_with("key", data)   op.presign_read("key", ttl)
//! op.read("key")               op.delete("key")
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService};
