//! Idempotent catalogue seeding keyed on coffee name.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::debug;

use crate::domain::CoffeeDraft;
use crate::domain::ports::{CoffeeRepository, CoffeeRepositoryError};

/// Errors raised while applying seed entries.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The repository rejected an insert.
    #[error("failed to seed {name}: {source}")]
    Repository {
        /// Seed entry being applied.
        name: String,
        /// Underlying repository failure.
        #[source]
        source: CoffeeRepositoryError,
    },
}

/// Counts reported after a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Entries inserted during this pass.
    pub inserted: usize,
    /// Entries skipped because the name already existed.
    pub skipped: usize,
}

/// Applies seed entries, creating each coffee only when its name is new.
#[derive(Clone)]
pub struct CatalogueSeeder {
    repository: Arc<dyn CoffeeRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogueSeeder {
    /// Create a seeder over the given repository.
    pub fn new(repository: Arc<dyn CoffeeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Insert every entry whose name is not yet present.
    ///
    /// Running the same entries twice leaves the catalogue unchanged on the
    /// second pass.
    pub async fn seed(&self, entries: &[CoffeeDraft]) -> Result<SeedOutcome, SeedingError> {
        let now = self.clock.utc();
        let mut outcome = SeedOutcome::default();
        for entry in entries {
            let inserted = self.repository
                .insert_if_absent(entry, now)
                .await
                .map_err(|source| SeedingError::Repository {
                    name: entry.name.to_string(),
                    source,
                })?;
            if inserted {
                outcome.inserted += 1;
            } else {
                debug!(name = %entry.name, "seed entry already present");
                outcome.skipped += 1;
            }
        }
        Ok(outcome)
    }
}
