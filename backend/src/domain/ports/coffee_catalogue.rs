//! Driving port for catalogue use-cases.
//!
//! HTTP handlers translate requests into these inputs and call the port;
//! they never see persistence or storage adapters directly.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{Coffee, CoffeeId, Error};

/// Price as submitted: JSON numbers arrive as `Number`, form fields as `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    /// Numeric JSON value.
    Number(f64),
    /// Unparsed text from a form field or JSON string.
    Text(String),
}

impl PriceInput {
    /// False for blank text, which counts as a missing price.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Number(_) => true,
            Self::Text(text) => !text.trim().is_empty(),
        }
    }
}

/// Image as submitted: a URL string or a binary file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Direct image URL stored verbatim.
    Url(String),
    /// Uploaded file destined for object storage.
    Upload {
        /// Original client file name.
        file_name: Option<String>,
        /// Client-reported MIME type.
        content_type: Option<String>,
        /// File contents.
        bytes: Bytes,
    },
}

impl ImageInput {
    /// False for a blank URL or an empty file part.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Url(url) => !url.trim().is_empty(),
            Self::Upload { bytes, .. } => !bytes.is_empty(),
        }
    }
}

/// Unvalidated create request gathered from JSON or multipart bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCoffeeSubmission {
    /// Requested name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Requested price.
    pub price: Option<PriceInput>,
    /// Image URL or file.
    pub image: Option<ImageInput>,
}

/// Unvalidated partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeUpdateSubmission {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement price.
    pub price: Option<PriceInput>,
    /// Replacement image URL.
    pub image: Option<String>,
}

/// Catalogue use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoffeeCatalogue: Send + Sync {
    /// Every coffee in the catalogue.
    async fn list_coffees(&self) -> Result<Vec<Coffee>, Error>;

    /// One coffee, or a `NotFound` error.
    async fn get_coffee(&self, id: CoffeeId) -> Result<Coffee, Error>;

    /// Validate, upload the image if needed, and store a new coffee.
    async fn create_coffee(&self, submission: NewCoffeeSubmission) -> Result<Coffee, Error>;

    /// Apply a partial update to an existing coffee.
    async fn update_coffee(
        &self,
        id: CoffeeId,
        submission: CoffeeUpdateSubmission,
    ) -> Result<Coffee, Error>;

    /// Hard-delete a coffee.
    async fn delete_coffee(&self, id: CoffeeId) -> Result<(), Error>;
}
