//! Builders for the repository and HTTP state behind the server.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use crate::domain::CoffeeCatalogueService;
use crate::domain::ports::{CoffeeRepository, ImageStore};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselCoffeeRepository, InMemoryCoffeeRepository};

/// Use PostgreSQL when a pool is available, otherwise an in-memory table.
pub fn build_coffee_repository(pool: Option<DbPool>) -> Arc<dyn CoffeeRepository> {
    match pool {
        Some(pool) => Arc::new(DieselCoffeeRepository::new(pool)),
        None => {
            warn!("DATABASE_URL not set; coffees are kept in memory and lost on restart");
            Arc::new(InMemoryCoffeeRepository::new())
        }
    }
}

/// Wire the catalogue service into the shared handler state.
pub fn build_http_state(
    repository: Arc<dyn CoffeeRepository>,
    images: Arc<dyn ImageStore>,
) -> web::Data<HttpState> {
    let service = CoffeeCatalogueService::new(repository, images, Arc::new(DefaultClock));
    web::Data::new(HttpState::new(Arc::new(service)))
}
