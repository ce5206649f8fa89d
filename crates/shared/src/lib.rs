//! Shared errors and configuration for Picvault.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error type mapped onto HTTP status codes
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, StorageSettings};
pub use error::AppError;
