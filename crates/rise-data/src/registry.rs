//! Seed registry types and JSON parsing.
//!
//! The registry holds named seed profiles. Each profile pairs an RNG seed
//! with the number of entities to generate, so a demo dataset can be
//! reproduced by name.

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};

use crate::atomic_io::write_atomic;
use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Number of entities generated for a seed profile.
///
/// The user count excludes the three fixed demo accounts, which are always
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityCounts {
    /// Randomized users generated after the demo accounts.
    pub users: usize,
    /// Projects generated.
    pub projects: usize,
    /// Investments (and mirrored transactions) generated.
    pub investments: usize,
    /// Notifications generated.
    pub notifications: usize,
}

impl Default for EntityCounts {
    fn default() -> Self {
        Self {
            users: 47,
            projects: 25,
            investments: 100,
            notifications: 150,
        }
    }
}

/// A seed registry containing named seed profiles.
///
/// # Example
///
/// ```
/// use rise_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| RegistryError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw.seeds.into_iter().map(SeedDefinition::from).collect();

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns a copy of the registry with `seed` appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSeedName`] when a seed with the same
    /// name is already registered.
    pub fn append_seed(&self, seed: SeedDefinition) -> Result<Self, RegistryError> {
        if self.seeds.iter().any(|existing| existing.name == seed.name) {
            return Err(RegistryError::DuplicateSeedName { name: seed.name });
        }
        let mut seeds = self.seeds.clone();
        seeds.push(seed);
        Ok(Self {
            version: self.version,
            seeds,
        })
    }

    /// Serializes the registry as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ParseError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let raw = RawSeedRegistry {
            version: self.version,
            seeds: self.seeds.iter().map(RawSeedDefinition::from).collect(),
        };
        serde_json::to_string_pretty(&raw).map_err(|e| RegistryError::ParseError {
            message: e.to_string(),
        })
    }

    /// Writes the registry to `path` inside `dir`, replacing it atomically.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WriteError`] if the file cannot be written.
    pub fn write_to_file(&self, dir: &Dir, path: &Utf8Path) -> Result<(), RegistryError> {
        let mut json = self.to_json()?;
        json.push('\n');
        write_atomic(dir, path, &json).map_err(|e| RegistryError::WriteError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// A named seed profile for deterministic dataset generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    counts: EntityCounts,
}

impl SeedDefinition {
    /// Creates a seed profile with the default entity counts.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            seed,
            counts: EntityCounts::default(),
        }
    }

    /// Replaces the entity counts.
    #[must_use]
    pub const fn with_counts(mut self, counts: EntityCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the entity counts to generate.
    #[must_use]
    pub const fn counts(&self) -> EntityCounts {
        self.counts
    }
}

impl From<RawSeedDefinition> for SeedDefinition {
    fn from(raw: RawSeedDefinition) -> Self {
        let defaults = EntityCounts::default();
        Self {
            name: raw.name,
            seed: raw.seed,
            counts: EntityCounts {
                users: raw.user_count.unwrap_or(defaults.users),
                projects: raw.project_count.unwrap_or(defaults.projects),
                investments: raw.investment_count.unwrap_or(defaults.investments),
                notifications: raw.notification_count.unwrap_or(defaults.notifications),
            },
        }
    }
}

/// Raw JSON representation for (de)serialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    investment_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notification_count: Option<usize>,
}

impl From<&SeedDefinition> for RawSeedDefinition {
    fn from(seed: &SeedDefinition) -> Self {
        let counts = seed.counts;
        Self {
            name: seed.name.clone(),
            seed: seed.seed,
            user_count: Some(counts.users),
            project_count: Some(counts.projects),
            investment_count: Some(counts.investments),
            notification_count: Some(counts.notifications),
        }
    }
}
