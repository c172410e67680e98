//! Shared HTTP adapter state.
//!
//! Handlers accept this via `web::Data` so they only depend on the
//! catalogue port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CoffeeCatalogue;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalogue use-cases.
    pub catalogue: Arc<dyn CoffeeCatalogue>,
}

impl HttpState {
    /// Construct state around a catalogue implementation.
    pub fn new(catalogue: Arc<dyn CoffeeCatalogue>) -> Self {
        Self { catalogue }
    }
}
