//! Catalogue seeding entry points.

use std::path::Path;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::CoffeeRepository;
use crate::domain::{CatalogueSeeder, SeedOutcome, SeedingError};

use super::config::SeedSettings;
use super::entries::{SeedFileError, load_seed_entries};

/// Errors returned while seeding the catalogue.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed entries could not be loaded.
    #[error(transparent)]
    SeedFile(#[from] SeedFileError),
    /// Entries could not be written.
    #[error("catalogue seeding error: {0}")]
    Seeding(#[from] SeedingError),
}

/// Seed the catalogue from `path` (or the embedded list) into `repository`.
///
/// Entries whose name already exists are left untouched, so repeated runs
/// converge on the same catalogue.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when entries cannot be loaded or written.
pub async fn seed_catalogue(
    path: Option<&Path>,
    repository: Arc<dyn CoffeeRepository>,
    clock: Arc<dyn Clock>,
) -> Result<SeedOutcome, StartupSeedingError> {
    let entries = load_seed_entries(path)?;
    let outcome = CatalogueSeeder::new(repository, clock)
        .seed(&entries)
        .await?;
    info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        "catalogue seeding complete"
    );
    Ok(outcome)
}

/// Seed on startup when enabled; returns `None` when seeding is off.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use coffee_backend::outbound::persistence::InMemoryCoffeeRepository;
/// use coffee_backend::seed::{SeedSettings, seed_catalogue_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SeedSettings { enabled: false, path: None };
/// let outcome =
///     seed_catalogue_on_startup(&settings, Arc::new(InMemoryCoffeeRepository::new())).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when enabled seeding fails.
pub async fn seed_catalogue_on_startup(
    settings: &SeedSettings,
    repository: Arc<dyn CoffeeRepository>,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "catalogue seeding skipped");
        return Ok(None);
    }
    seed_catalogue(settings.path.as_deref(), repository, Arc::new(DefaultClock))
        .await
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::InMemoryCoffeeRepository;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeding_twice_yields_seven_coffees() {
        let repository = Arc::new(InMemoryCoffeeRepository::new());
        let settings = SeedSettings {
            enabled: true,
            path: None,
        };

        let first = seed_catalogue_on_startup(&settings, repository.clone())
            .await
            .expect("first pass");
        let second = seed_catalogue_on_startup(&settings, repository.clone())
            .await
            .expect("second pass");

        assert_eq!(first, Some(SeedOutcome { inserted: 7, skipped: 0 }));
        assert_eq!(second, Some(SeedOutcome { inserted: 0, skipped: 7 }));
        assert_eq!(repository.list().await.expect("list").len(), 7);
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_leaves_the_store_empty() {
        let repository = Arc::new(InMemoryCoffeeRepository::new());
        let settings = SeedSettings {
            enabled: false,
            path: None,
        };

        let outcome = seed_catalogue_on_startup(&settings, repository.clone())
            .await
            .expect("skip");

        assert!(outcome.is_none());
        assert!(repository.list().await.expect("list").is_empty());
    }
}
