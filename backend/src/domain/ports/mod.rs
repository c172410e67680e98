//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CoffeeRepository`, `ImageStore`) are implemented by
//! outbound adapters. The driving port (`CoffeeCatalogue`) is what inbound
//! HTTP handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod coffee_catalogue;
mod coffee_repository;
mod image_store;

pub use coffee_catalogue::{
    CoffeeCatalogue, CoffeeUpdateSubmission, ImageInput, NewCoffeeSubmission, PriceInput,
};
#[cfg(test)]
pub use coffee_catalogue::MockCoffeeCatalogue;
pub use coffee_repository::{CoffeeRepository, CoffeeRepositoryError};
#[cfg(test)]
pub use coffee_repository::MockCoffeeRepository;
pub use image_store::{ImageStore, ImageStoreError, ImageUpload, UnconfiguredImageStore};
#[cfg(test)]
pub use image_store::MockImageStore;
