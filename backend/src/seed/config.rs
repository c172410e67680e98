//! Seed configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Controls catalogue seeding at server start.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE_SEED")]
pub struct SeedSettings {
    /// Seed the catalogue on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// JSON file replacing the embedded seed list.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    //! Unit tests for seed configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> SeedSettings {
        SeedSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn seeding_is_off_by_default() {
        let _guard = lock_env([
            ("CATALOGUE_SEED_ENABLED", None::<String>),
            ("CATALOGUE_SEED_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert!(!settings.enabled);
        assert!(settings.path.is_none());
    }

    #[rstest]
    fn environment_enables_seeding_with_override() {
        let _guard = lock_env([
            ("CATALOGUE_SEED_ENABLED", Some("true".to_owned())),
            ("CATALOGUE_SEED_PATH", Some("/tmp/coffees.json".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert!(settings.enabled);
        assert_eq!(settings.path, Some(PathBuf::from("/tmp/coffees.json")));
    }
}
