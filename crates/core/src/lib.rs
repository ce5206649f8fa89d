//! Core image logic for Picvault.
//!
//! This crate contains domain logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `storage` - Object storage for image bytes (Apache OpenDAL)
//! - `image` - Image records, list filters, and the upload/list/view/delete service

pub mod image;
pub mod storage;
