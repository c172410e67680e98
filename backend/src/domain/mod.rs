//! Domain primitives, ports, and use-case services for the coffee catalogue.
//!
//! Public surface:
//! - `Coffee` and its validated parts (`CoffeeId`, `CoffeeName`, `Price`,
//!   `ImageRef`), plus `CoffeeDraft` and `CoffeePatch` for writes.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `CoffeeCatalogueService`: implementation of the `CoffeeCatalogue` port.
//! - `CatalogueSeeder`: idempotent seeding keyed on name.
//! - `TraceId`: request correlation identifier.

pub mod catalogue_service;
pub mod coffee;
pub mod error;
pub mod ports;
pub mod seeding;
pub mod trace_id;

pub use self::catalogue_service::CoffeeCatalogueService;
pub use self::coffee::{
    Coffee, CoffeeDraft, CoffeeId, CoffeeName, CoffeePatch, CoffeeValidationError, ImageRef,
    Price,
};
pub use self::error::{Error, ErrorCode};
pub use self::seeding::{CatalogueSeeder, SeedOutcome, SeedingError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
