//! S3-backed `ImageStore` adapter.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, info, warn};

use crate::domain::ports::{ImageStore, ImageStoreError, ImageUpload};

use super::settings::StorageSettings;

/// Uploads images to a single bucket and hands back their public URLs.
#[derive(Debug, Clone)]
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    public_base_url: Option<String>,
}

impl S3ImageStore {
    /// Wrap an existing client.
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        region: impl Into<String>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            region: region.into(),
            public_base_url,
        }
    }

    /// Build a client from settings. Returns `None` when no bucket is set.
    pub async fn from_settings(settings: &StorageSettings) -> Option<Self> {
        let bucket = settings.bucket()?.to_owned();
        let region = settings.region().to_owned();

        let mut builder = match settings.static_credentials() {
            Some((access_key, secret_key)) => {
                let mut builder = aws_sdk_s3::Config::builder();
                builder.set_region(Some(Region::new(region.clone())));
                builder.set_credentials_provider(Some(SharedCredentialsProvider::new(
                    Credentials::new(access_key, secret_key, None, None, "StorageSettings"),
                )));
                builder
            }
            None => {
                debug!("no static storage credentials; using the default chain");
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.clone()))
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };
        builder.set_endpoint_url(settings.endpoint.clone());
        builder.set_force_path_style(Some(settings.endpoint.is_some()));

        info!(%bucket, %region, "object storage configured");
        Some(Self::new(
            aws_sdk_s3::Client::from_conf(builder.build()),
            bucket,
            region,
            settings.public_base_url.clone(),
        ))
    }

    /// Public URL for `key` in this bucket.
    pub fn public_url(&self, key: &str) -> String {
        public_url(
            self.public_base_url.as_deref(),
            &self.bucket,
            &self.region,
            key,
        )
    }
}

pub(crate) fn public_url(base: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match base.map(|base| base.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{base}/{key}"),
        _ => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_image(&self, upload: ImageUpload) -> Result<String, ImageStoreError> {
        let size = upload.bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&upload.key)
            .body(upload.bytes.into())
            .set_content_type(upload.content_type)
            .send()
            .await
            .map_err(|err| {
                let message = DisplayErrorContext(&err).to_string();
                warn!(key = %upload.key, error = %message, "image upload failed");
                ImageStoreError::upload(message)
            })?;

        debug!(key = %upload.key, size, "image uploaded");
        Ok(self.public_url(&upload.key))
    }
}
