//! Image management: upload, list, view and delete.
//!
//! Each operation is a straight line over two backing stores:
//! - the object store holding image bytes (see [`crate::storage`])
//! - the metadata table, reached through [`ImageRepository`]
//!
//! The two stores are updated independently. A failure between the two
//! steps of an upload or delete leaves them out of step; nothing is rolled back.

mod error;
mod service;
mod types;

pub use error::{ImageError, RepositoryError};
pub use service::{ImageRepository, ImageService};
pub use types::{
    DEFAULT_LIST_LIMIT, IMAGE_EXTENSION, ImageDownload, ImageFilter, ImageRecord,
    UploadImageInput, UploadImageResult, storage_key,
};
