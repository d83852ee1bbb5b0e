//! Store configuration loaded via OrthoConfig.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use rise_data::{RegistryError, SeedDefinition, SeedRegistry, open_parent_dir};
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "rise-demo";
const DEFAULT_SEED: u64 = 20_240_301;
const DEFAULT_SNAPSHOT_PATH: &str = "rise-state.json";

/// Settings for the demo store and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RISE")]
pub struct StoreSettings {
    /// Snapshot file the store restores from and writes to.
    pub snapshot_path: Option<Utf8PathBuf>,
    /// Seed registry to resolve `seed_name` against.
    pub registry_path: Option<Utf8PathBuf>,
    /// Seed profile used when demo data is generated.
    pub seed_name: Option<String>,
    /// Simulated settlement latency in milliseconds.
    #[ortho_config(default = 800)]
    pub gateway_latency_ms: u64,
    /// Upper bound on a settlement in milliseconds.
    #[ortho_config(default = 5_000)]
    pub gateway_timeout_ms: u64,
}

impl StoreSettings {
    /// Return the configured snapshot path, falling back to the default.
    #[must_use]
    pub fn snapshot_path(&self) -> Utf8PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SNAPSHOT_PATH))
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the simulated gateway latency.
    #[must_use]
    pub const fn gateway_latency(&self) -> Duration {
        Duration::from_millis(self.gateway_latency_ms)
    }

    /// Return the gateway timeout.
    #[must_use]
    pub const fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }

    /// Resolves the seed profile for dataset generation.
    ///
    /// With a registry configured the seed name is looked up in it. Without
    /// one the built-in profile is used under the configured name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the registry cannot be read, is
    /// invalid, or lacks the named seed.
    pub fn seed_definition(&self) -> Result<SeedDefinition, RegistryError> {
        let Some(registry_path) = self.registry_path.as_deref() else {
            return Ok(SeedDefinition::new(self.seed_name(), DEFAULT_SEED));
        };
        let registry = load_registry(registry_path)?;
        registry.find_seed(self.seed_name()).cloned()
    }
}

fn load_registry(path: &Utf8Path) -> Result<SeedRegistry, RegistryError> {
    let (dir, file_name) = open_parent_dir(path).map_err(|err| RegistryError::IoError {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    SeedRegistry::from_file(&dir, Utf8Path::new(file_name))
}

#[cfg(test)]
mod tests {
    //! Unit tests for store configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use crate::domain::DEFAULT_GATEWAY_TIMEOUT;
    use crate::outbound::DEFAULT_LATENCY;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "RISE_SNAPSHOT_PATH",
        "RISE_REGISTRY_PATH",
        "RISE_SEED_NAME",
        "RISE_GATEWAY_LATENCY_MS",
        "RISE_GATEWAY_TIMEOUT_MS",
    ];

    fn load_from_empty_args() -> StoreSettings {
        StoreSettings::load_from_iter([OsString::from("rise-demo")]).expect("config should load")
    }

    fn cleared_env() -> [(&'static str, Option<String>); 5] {
        VARS.map(|name| (name, None))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();
        assert_eq!(settings.snapshot_path(), Utf8PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        assert_eq!(settings.seed_name(), DEFAULT_SEED_NAME);
        assert_eq!(settings.gateway_latency(), DEFAULT_LATENCY);
        assert_eq!(settings.gateway_timeout(), DEFAULT_GATEWAY_TIMEOUT);

        let seed = settings.seed_definition().expect("built-in seed");
        assert_eq!(seed.name(), DEFAULT_SEED_NAME);
        assert_eq!(seed.seed(), DEFAULT_SEED);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RISE_SNAPSHOT_PATH", Some("/tmp/rise/state.json".to_owned())),
            ("RISE_REGISTRY_PATH", None),
            ("RISE_SEED_NAME", Some("quiet-harbor".to_owned())),
            ("RISE_GATEWAY_LATENCY_MS", Some("50".to_owned())),
            ("RISE_GATEWAY_TIMEOUT_MS", Some("250".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.snapshot_path(),
            Utf8PathBuf::from("/tmp/rise/state.json")
        );
        assert_eq!(settings.seed_name(), "quiet-harbor");
        assert_eq!(settings.gateway_latency(), Duration::from_millis(50));
        assert_eq!(settings.gateway_timeout(), Duration::from_millis(250));
        assert_eq!(
            settings.seed_definition().expect("built-in seed").name(),
            "quiet-harbor"
        );
    }

    #[rstest]
    fn registry_seeds_are_resolved_by_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("seeds.json"))
            .expect("utf-8 temp path");
        std::fs::write(
            &path,
            r#"{"version": 1, "seeds": [{"name": "harbor", "seed": 99, "userCount": 4}]}"#,
        )
        .expect("write registry");

        let _guard = lock_env([
            ("RISE_SNAPSHOT_PATH", None),
            ("RISE_REGISTRY_PATH", Some(path.to_string())),
            ("RISE_SEED_NAME", Some("harbor".to_owned())),
            ("RISE_GATEWAY_LATENCY_MS", None),
            ("RISE_GATEWAY_TIMEOUT_MS", None),
        ]);

        let seed = load_from_empty_args()
            .seed_definition()
            .expect("seed from registry");
        assert_eq!(seed.seed(), 99);
        assert_eq!(seed.counts().users, 4);
    }

    #[rstest]
    fn unreadable_registries_are_reported() {
        let _guard = lock_env([
            ("RISE_SNAPSHOT_PATH", None),
            ("RISE_REGISTRY_PATH", Some("/nonexistent/rise/seeds.json".to_owned())),
            ("RISE_SEED_NAME", None),
            ("RISE_GATEWAY_LATENCY_MS", None),
            ("RISE_GATEWAY_TIMEOUT_MS", None),
        ]);

        let err = load_from_empty_args()
            .seed_definition()
            .expect_err("missing registry");
        assert!(matches!(err, RegistryError::IoError { .. }));
    }
}
