//! Coffee persistence adapters.
//!
//! `DieselCoffeeRepository` talks to PostgreSQL through `diesel-async` and a
//! `bb8` pool; `InMemoryCoffeeRepository` serves the same port without a
//! database. Row structs and the Diesel schema stay private to this module.
//!
//! ```rust,no_run
//! use coffee_backend::outbound::persistence::{DbPool, DieselCoffeeRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coffee")).await?;
//! let repository = DieselCoffeeRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_coffee_repository;
mod memory_coffee_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_coffee_repository::DieselCoffeeRepository;
pub use memory_coffee_repository::InMemoryCoffeeRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
