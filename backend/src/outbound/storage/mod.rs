//! Object storage adapters for coffee images.

mod s3_image_store;
mod settings;

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{ImageStore, UnconfiguredImageStore};

pub use s3_image_store::S3ImageStore;
pub use settings::StorageSettings;

/// Pick the image store for these settings: S3 when a bucket is configured,
/// otherwise a store that rejects every upload.
pub async fn image_store_from_settings(settings: &StorageSettings) -> Arc<dyn ImageStore> {
    match S3ImageStore::from_settings(settings).await {
        Some(store) => Arc::new(store),
        None => {
            warn!("STORAGE_BUCKET not set; image uploads are disabled");
            Arc::new(UnconfiguredImageStore)
        }
    }
}
