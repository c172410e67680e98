//! Port for pushing uploaded coffee images to object storage.

use async_trait::async_trait;
use bytes::Bytes;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// No bucket has been configured for uploads.
        Unconfigured => "object storage is not configured",
        /// The upload request failed.
        Upload { message: String } => "image upload failed: {message}",
    }
}

/// One binary image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Object key inside the bucket.
    pub key: String,
    /// MIME type reported by the client, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Bytes,
}

/// Object storage for coffee images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image and return its public URL.
    async fn put_image(&self, upload: ImageUpload) -> Result<String, ImageStoreError>;
}

/// Image store used when no bucket is configured; rejects every upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredImageStore;

#[async_trait]
impl ImageStore for UnconfiguredImageStore {
    async fn put_image(&self, _upload: ImageUpload) -> Result<String, ImageStoreError> {
        Err(ImageStoreError::unconfigured())
    }
}
