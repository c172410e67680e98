//! Seed entry parsing.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{CoffeeDraft, CoffeeName, CoffeeValidationError, ImageRef, Price};

/// Seed list compiled into the binary.
pub const EMBEDDED_SEED: &str = include_str!("../../fixtures/seed/coffees.json");

/// Errors raised while reading seed entries.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// The override file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The JSON document is malformed.
    #[error("seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry failed domain validation.
    #[error("seed entry {index} is invalid: {source}")]
    Invalid {
        /// Zero-based position in the list.
        index: usize,
        /// Validation failure.
        #[source]
        source: CoffeeValidationError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedEntry {
    name: String,
    description: Option<String>,
    price: f64,
    image: String,
}

impl SeedEntry {
    fn into_draft(self) -> Result<CoffeeDraft, CoffeeValidationError> {
        Ok(CoffeeDraft {
            name: CoffeeName::new(self.name)?,
            description: self.description,
            price: Price::new(self.price)?,
            image: ImageRef::new(self.image)?,
        })
    }
}

/// Parse a JSON array of `{name, description?, price, image}` objects.
///
/// # Errors
///
/// Returns [`SeedFileError::Parse`] for malformed JSON and
/// [`SeedFileError::Invalid`] for entries that fail validation.
pub fn parse_seed_entries(json: &str) -> Result<Vec<CoffeeDraft>, SeedFileError> {
    let entries: Vec<SeedEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_draft()
                .map_err(|source| SeedFileError::Invalid { index, source })
        })
        .collect()
}

/// Load seed entries from `path`, or the embedded list when `None`.
///
/// # Errors
///
/// Returns [`SeedFileError`] when the file cannot be read or parsed.
pub fn load_seed_entries(path: Option<&Path>) -> Result<Vec<CoffeeDraft>, SeedFileError> {
    match path {
        Some(path) => parse_seed_entries(&read_seed_file(path)?),
        None => parse_seed_entries(EMBEDDED_SEED),
    }
}

fn read_seed_file(path: &Path) -> Result<String, SeedFileError> {
    let read_error = |source| SeedFileError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}
