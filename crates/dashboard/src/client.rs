//! Typed access to the coffee API.
//!
//! Every failure collapses into one fixed [`ClientError`] per operation; the
//! underlying cause is only logged at debug level.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;

use crate::model::{Coffee, CoffeeUpdate, NewCoffee, NewCoffeeUpload};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-operation failure surfaced to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Listing coffees failed.
    #[error("Network response was not ok")]
    List,
    /// Fetching one coffee failed.
    #[error("Failed to fetch coffee")]
    Get,
    /// Creating a coffee failed.
    #[error("Network response was not ok")]
    Create,
    /// Updating a coffee failed.
    #[error("Failed to update coffee")]
    Update,
    /// Deleting a coffee failed.
    #[error("Network response was not ok")]
    Delete,
}

/// Operations offered by the coffee API.
#[async_trait]
pub trait CoffeeApi: Send + Sync {
    /// Fetch every coffee.
    async fn list(&self) -> Result<Vec<Coffee>, ClientError>;
    /// Fetch one coffee by id.
    async fn get_by_id(&self, id: i32) -> Result<Coffee, ClientError>;
    /// Create a coffee whose image is a URL.
    async fn create(&self, coffee: &NewCoffee) -> Result<Coffee, ClientError>;
    /// Create a coffee and upload its image.
    async fn create_with_image(&self, coffee: NewCoffeeUpload) -> Result<Coffee, ClientError>;
    /// Apply a partial update.
    async fn update(&self, id: i32, update: &CoffeeUpdate) -> Result<Coffee, ClientError>;
    /// Delete a coffee.
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// `reqwest` implementation of [`CoffeeApi`].
///
/// `base_url` is the API root, e.g. `http://localhost:8080/api`; requests go
/// to `{base_url}/coffee`.
#[derive(Debug, Clone)]
pub struct HttpCoffeeClient {
    http: Client,
    base_url: String,
}

impl HttpCoffeeClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// API root this client targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/coffee", self.base_url)
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/coffee/{id}", self.base_url)
    }
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    failure: ClientError,
) -> Result<T, ClientError> {
    let response = request.send().await.map_err(|err| {
        debug!(operation = ?failure, error = %err, "coffee API request failed");
        failure
    })?;
    let status = response.status();
    if !status.is_success() {
        debug!(operation = ?failure, %status, "coffee API returned an error status");
        return Err(failure);
    }
    response.json::<T>().await.map_err(|err| {
        debug!(operation = ?failure, error = %err, "coffee API returned an unreadable body");
        failure
    })
}

fn upload_form(coffee: NewCoffeeUpload) -> Result<Form, reqwest::Error> {
    let NewCoffeeUpload {
        name,
        description,
        price,
        file,
    } = coffee;
    let mut image = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = file.content_type.as_deref() {
        image = image.mime_str(mime)?;
    }
    let mut form = Form::new()
        .text("name", name)
        .text("price", price.to_string());
    if let Some(text) = description {
        form = form.text("description", text);
    }
    Ok(form.part("image", image))
}

#[async_trait]
impl CoffeeApi for HttpCoffeeClient {
    async fn list(&self) -> Result<Vec<Coffee>, ClientError> {
        send_json(self.http.get(self.collection_url()), ClientError::List).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Coffee, ClientError> {
        send_json(self.http.get(self.item_url(id)), ClientError::Get).await
    }

    async fn create(&self, coffee: &NewCoffee) -> Result<Coffee, ClientError> {
        send_json(
            self.http.post(self.collection_url()).json(coffee),
            ClientError::Create,
        )
        .await
    }

    async fn create_with_image(&self, coffee: NewCoffeeUpload) -> Result<Coffee, ClientError> {
        let form = upload_form(coffee).map_err(|err| {
            debug!(error = %err, "invalid image content type");
            ClientError::Create
        })?;
        send_json(
            self.http.post(self.collection_url()).multipart(form),
            ClientError::Create,
        )
        .await
    }

    async fn update(&self, id: i32, update: &CoffeeUpdate) -> Result<Coffee, ClientError> {
        send_json(self.http.put(self.item_url(id)).json(update), ClientError::Update).await
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        send_json::<IgnoredAny>(self.http.delete(self.item_url(id)), ClientError::Delete)
            .await
            .map(|_| ())
    }
}
