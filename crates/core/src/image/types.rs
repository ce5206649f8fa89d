//! Image types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ImageError;

/// Extension appended to the identifier to form the storage key.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Result count used when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: u64 = 10;

/// Storage key for an image: `{image_id}.jpg`.
#[must_use]
pub fn storage_key(image_id: &str) -> String {
    format!("{image_id}.{IMAGE_EXTENSION}")
}

/// Metadata record for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Identifier generated at upload time.
    pub image_id: String,
    /// Free-text title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Location reference of the stored bytes.
    pub storage_url: String,
}

/// Input for uploading an image. Empty fields count as missing.
#[derive(Debug, Clone, Default)]
pub struct UploadImageInput {
    /// Image title.
    pub title: String,
    /// Image description.
    pub description: String,
    /// Raw image bytes.
    pub image: Bytes,
}

impl UploadImageInput {
    /// Check that every field is present.
    ///
    /// # Errors
    ///
    /// Returns `MissingUploadFields` if any field is empty.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.title.is_empty() || self.description.is_empty() || self.image.is_empty() {
            return Err(ImageError::MissingUploadFields);
        }
        Ok(())
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadImageResult {
    /// Newly generated identifier.
    pub image_id: String,
    /// Location reference of the stored bytes.
    pub storage_url: String,
}

/// Time-limited download reference for an image.
#[derive(Debug, Clone)]
pub struct ImageDownload {
    /// Image identifier.
    pub image_id: String,
    /// Presigned GET URL.
    pub download_url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Scan filter for listing images.
///
/// Substring filters are case-sensitive and AND-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilter {
    /// Title must contain this substring.
    pub title: Option<String>,
    /// Description must contain this substring.
    pub description: Option<String>,
    /// Maximum number of records returned.
    pub limit: u64,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ImageFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Empty substrings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if `limit` is not a non-negative integer.
    pub fn from_params(
        title: Option<String>,
        description: Option<String>,
        limit: Option<&str>,
    ) -> Result<Self, ImageError> {
        let limit = match limit.map(str::trim) {
            None | Some("") => DEFAULT_LIST_LIMIT,
            Some(raw) => raw
                .parse()
                .map_err(|_| ImageError::invalid_payload("limit must be a non-negative integer"))?,
        };

        Ok(Self {
            title: title.filter(|s| !s.is_empty()),
            description: description.filter(|s| !s.is_empty()),
            limit,
        })
    }

    /// Set the title substring.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description substring.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// True when neither substring filter is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Check whether a record passes both substring filters.
    #[must_use]
    pub fn matches(&self, record: &ImageRecord) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|needle| record.title.contains(needle));
        let description_ok = self
            .description
            .as_deref()
            .is_none_or(|needle| record.description.contains(needle));
        title_ok && description_ok
    }

    /// Limit as a `usize`, saturating on narrow targets.
    #[must_use]
    pub fn limit_usize(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(title: &str, description: &str) -> ImageRecord {
        ImageRecord {
            image_id: "id".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            storage_url: "memory:///id.jpg".to_string(),
        }
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("abc"), "abc.jpg");
    }

    #[rstest]
    #[case("", "desc", b"x".as_slice())]
    #[case("title", "", b"x".as_slice())]
    #[case("title", "desc", b"".as_slice())]
    fn test_upload_validate_missing(
        #[case] title: &str,
        #[case] description: &str,
        #[case] image: &[u8],
    ) {
        let input = UploadImageInput {
            title: title.to_string(),
            description: description.to_string(),
            image: Bytes::copy_from_slice(image),
        };
        assert!(matches!(
            input.validate(),
            Err(ImageError::MissingUploadFields)
        ));
    }

    #[test]
    fn test_upload_validate_ok() {
        let input = UploadImageInput {
            title: "Sunset".to_string(),
            description: "A beautiful sunset".to_string(),
            image: Bytes::from_static(b"\xff\xd8"),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_filter_from_params_defaults() {
        let filter = ImageFilter::from_params(None, Some(String::new()), None).expect("valid");
        assert_eq!(filter, ImageFilter::default());
        assert!(filter.is_unfiltered());
    }

    #[test]
    fn test_filter_from_params_limit() {
        let filter =
            ImageFilter::from_params(Some("Sun".into()), None, Some("5")).expect("valid");
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.title.as_deref(), Some("Sun"));
    }

    #[rstest]
    #[case("ten")]
    #[case("-1")]
    #[case("1.5")]
    fn test_filter_from_params_bad_limit(#[case] limit: &str) {
        let err = ImageFilter::from_params(None, None, Some(limit)).unwrap_err();
        assert!(matches!(err, ImageError::InvalidPayload(_)));
    }

    #[test]
    fn test_filter_matches_and_combined() {
        let filter = ImageFilter::default()
            .with_title("Sun")
            .with_description("beach");
        assert!(filter.matches(&record("Sunset", "on the beach")));
        assert!(!filter.matches(&record("Sunset", "in the mountains")));
        assert!(!filter.matches(&record("Mountain", "on the beach")));
    }

    #[test]
    fn test_filter_matches_case_sensitive() {
        let filter = ImageFilter::default().with_title("sun");
        assert!(!filter.matches(&record("Sunset", "")));
        assert!(filter.matches(&record("a sunny day", "")));
    }
}
