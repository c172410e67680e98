//! Catalogue seed data and startup wiring.

mod config;
mod entries;
mod startup;

pub use config::SeedSettings;
pub use entries::{EMBEDDED_SEED, SeedFileError, load_seed_entries, parse_seed_entries};
pub use startup::{StartupSeedingError, seed_catalogue, seed_catalogue_on_startup};
