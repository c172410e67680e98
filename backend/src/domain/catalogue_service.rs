//! Catalogue use-case service backing the `CoffeeCatalogue` driving port.
//!
//! The service owns request validation and the mapping from adapter failures
//! to client-facing errors. Every write failure collapses to one message per
//! operation; the cause is only logged.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CoffeeCatalogue, CoffeeRepository, CoffeeRepositoryError, CoffeeUpdateSubmission, ImageInput,
    ImageStore, ImageStoreError, ImageUpload, NewCoffeeSubmission, PriceInput,
};
use crate::domain::{
    Coffee, CoffeeDraft, CoffeeId, CoffeeName, CoffeePatch, CoffeeValidationError, Error,
    ImageRef, Price,
};

const MISSING_FIELDS: &str = "Missing fields";
const CREATE_FAILED: &str = "Error creating coffee";
const UPDATE_FAILED: &str = "Error updating coffee";
const DELETE_FAILED: &str = "Error deleting coffee";
const NOT_FOUND: &str = "Coffee not found";
const FALLBACK_FILE_NAME: &str = "image";

/// Internal failure reasons for write operations; never shown to clients.
#[derive(Debug, Error)]
enum WriteFailure {
    #[error(transparent)]
    Validation(#[from] CoffeeValidationError),
    #[error(transparent)]
    Storage(#[from] ImageStoreError),
    #[error(transparent)]
    Repository(#[from] CoffeeRepositoryError),
    #[error("coffee {0} does not exist")]
    Missing(CoffeeId),
}

/// Default [`CoffeeCatalogue`] implementation.
#[derive(Clone)]
pub struct CoffeeCatalogueService {
    repository: Arc<dyn CoffeeRepository>,
    images: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
}

impl CoffeeCatalogueService {
    /// Build the service from its driven ports.
    pub fn new(
        repository: Arc<dyn CoffeeRepository>,
        images: Arc<dyn ImageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            images,
            clock,
        }
    }

    async fn build_draft(
        &self,
        name: String,
        description: Option<String>,
        price: PriceInput,
        image: ImageInput,
    ) -> Result<CoffeeDraft, WriteFailure> {
        let name = CoffeeName::new(name)?;
        let price = parse_price(price)?;
        let image = match image {
            ImageInput::Url(url) => ImageRef::new(url)?,
            ImageInput::Upload {
                file_name,
                content_type,
                bytes,
            } => {
                let key = object_key(
                    self.clock.utc().timestamp_millis(),
                    file_name.as_deref(),
                );
                let url = self.images
                    .put_image(ImageUpload {
                        key,
                        content_type,
                        bytes,
                    })
                    .await?;
                ImageRef::new(url)?
            }
        };
        Ok(CoffeeDraft {
            name,
            description: description.filter(|text| !text.trim().is_empty()),
            price,
            image,
        })
    }

    async fn try_create(
        &self,
        name: String,
        description: Option<String>,
        price: PriceInput,
        image: ImageInput,
    ) -> Result<Coffee, WriteFailure> {
        let draft = self.build_draft(name, description, price, image).await?;
        Ok(self.repository.create(&draft, self.clock.utc()).await?)
    }

    async fn try_update(
        &self,
        id: CoffeeId,
        submission: CoffeeUpdateSubmission,
    ) -> Result<Coffee, WriteFailure> {
        let patch = parse_patch(submission)?;
        self.repository
            .update(id, &patch, self.clock.utc())
            .await?
            .ok_or(WriteFailure::Missing(id))
    }

    async fn try_delete(&self, id: CoffeeId) -> Result<(), WriteFailure> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(WriteFailure::Missing(id))
        }
    }
}

fn parse_price(input: PriceInput) -> Result<Price, CoffeeValidationError> {
    match input {
        PriceInput::Number(value) => Price::new(value),
        PriceInput::Text(text) => Price::parse(&text),
    }
}

fn parse_patch(submission: CoffeeUpdateSubmission) -> Result<CoffeePatch, CoffeeValidationError> {
    let CoffeeUpdateSubmission { name, price, image } = submission;
    Ok(CoffeePatch {
        name: name.map(CoffeeName::new).transpose()?,
        price: price.map(parse_price).transpose()?,
        image: image.map(ImageRef::new).transpose()?,
    })
}

/// Build the object key `{millis}-{file name}` for an upload.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced with `_`.
pub(crate) fn object_key(timestamp_millis: i64, file_name: Option<&str>) -> String {
    let sanitised: String = file_name
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let base = if sanitised.is_empty() {
        FALLBACK_FILE_NAME
    } else {
        sanitised.as_str()
    };
    format!("{timestamp_millis}-{base}")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl CoffeeCatalogue for CoffeeCatalogueService {
    async fn list_coffees(&self) -> Result<Vec<Coffee>, Error> {
        self.repository.list().await.map_err(|err| {
            error!(error = %err, "listing coffees failed");
            Error::internal("Error fetching coffees")
        })
    }

    async fn get_coffee(&self, id: CoffeeId) -> Result<Coffee, Error> {
        match self.repository.find_by_id(id).await {
            Ok(Some(coffee)) => Ok(coffee),
            Ok(None) => Err(Error::not_found(NOT_FOUND)),
            Err(err) => {
                error!(coffee_id = %id, error = %err, "fetching coffee failed");
                Err(Error::internal("Error fetching coffee"))
            }
        }
    }

    async fn create_coffee(&self, submission: NewCoffeeSubmission) -> Result<Coffee, Error> {
        let NewCoffeeSubmission {
            name,
            description,
            price,
            image,
        } = submission;
        let (Some(name), Some(price), Some(image)) = (
            non_blank(name),
            price.filter(PriceInput::is_present),
            image.filter(ImageInput::is_present),
        ) else {
            return Err(Error::invalid_request(MISSING_FIELDS));
        };

        match self.try_create(name, description, price, image).await {
            Ok(coffee) => {
                info!(coffee_id = %coffee.id, name = %coffee.name, "coffee created");
                Ok(coffee)
            }
            Err(err) => {
                warn!(error = %err, "creating coffee failed");
                Err(Error::operation_failed(CREATE_FAILED))
            }
        }
    }

    async fn update_coffee(
        &self,
        id: CoffeeId,
        submission: CoffeeUpdateSubmission,
    ) -> Result<Coffee, Error> {
        self.try_update(id, submission).await.map_err(|err| {
            warn!(coffee_id = %id, error = %err, "updating coffee failed");
            Error::operation_failed(UPDATE_FAILED)
        })
    }

    async fn delete_coffee(&self, id: CoffeeId) -> Result<(), Error> {
        self.try_delete(id).await.map_err(|err| {
            warn!(coffee_id = %id, error = %err, "deleting coffee failed");
            Error::operation_failed(DELETE_FAILED)
        })?;
        info!(coffee_id = %id, "coffee deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
