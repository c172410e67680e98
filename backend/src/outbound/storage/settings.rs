//! Object storage configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_REGION: &str = "us-east-1";

/// Bucket and credential settings for image uploads.
///
/// Uploads are disabled unless `STORAGE_BUCKET` is set. Without an access
/// key pair the AWS default credential chain is used.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STORAGE")]
pub struct StorageSettings {
    /// Destination bucket.
    pub bucket: Option<String>,
    /// Bucket region.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores; enables path-style URLs.
    pub endpoint: Option<String>,
    /// Base URL prepended to object keys in returned image URLs.
    pub public_base_url: Option<String>,
    /// Static access key id.
    pub access_key: Option<String>,
    /// Static secret access key.
    pub secret_key: Option<String>,
}

impl StorageSettings {
    /// Return the configured bucket, ignoring blank values.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// Return the configured region, falling back to `us-east-1`.
    pub fn region(&self) -> &str {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }

    /// Return the static key pair when both halves are present.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(access), Some(secret)) if !access.is_empty() && !secret.is_empty() => {
                Some((access, secret))
            }
            _ => None,
        }
    }
}
