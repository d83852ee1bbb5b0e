//! Appending seed profiles to a registry file.
//!
//! Profiles without an explicit name are named after the word encoding of
//! their seed, so the dataset can be recreated from the name alone. When
//! neither a name nor a seed is given, random seeds are tried until one
//! encodes to an unused name.

use std::fmt;

use base_d::{WordDictionary, word, wordlists};
use camino::{Utf8Path, Utf8PathBuf};
use rand::Rng;
use thiserror::Error;

use crate::atomic_io::open_parent_dir;
use crate::error::RegistryError;
use crate::registry::{EntityCounts, SeedDefinition, SeedRegistry};

/// Random seeds tried before giving up on a derived name.
pub const NAME_ATTEMPTS: usize = 5;

/// Profile to add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRequest {
    /// Explicit name. Derived from the seed when absent.
    pub name: Option<String>,
    /// RNG seed. Random when absent.
    pub seed: Option<u64>,
    /// Entities to generate.
    pub counts: EntityCounts,
}

/// Profile that was written to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProfile {
    /// Stored name.
    pub name: String,
    /// Stored seed.
    pub seed: u64,
    /// Stored entity counts.
    pub counts: EntityCounts,
    /// Registry file that was updated.
    pub registry: Utf8PathBuf,
}

impl fmt::Display for AddedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts;
        write!(
            f,
            "added seed \"{}\" to {} (seed={}, users={}, projects={}, investments={}, \
             notifications={})",
            self.name,
            self.registry,
            self.seed,
            counts.users,
            counts.projects,
            counts.investments,
            counts.notifications,
        )
    }
}

/// Failures while adding a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The word list for derived names could not be built.
    #[error("cannot build the seed name word list: {message}")]
    WordList {
        /// Builder message.
        message: String,
    },
    /// The requested seed encodes to a name that is already registered.
    #[error("seed {seed} is named '{name}', which is already registered; pass --name")]
    NameTaken {
        /// Derived name.
        name: String,
        /// Requested seed.
        seed: u64,
    },
    /// Every random seed tried encoded to a registered name.
    #[error("no unused seed name after {attempts} random seeds")]
    NamesExhausted {
        /// Seeds tried.
        attempts: usize,
    },
    /// Reading, validating or writing the registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Encodes seeds as hyphenated words.
pub struct SeedNamer {
    dictionary: WordDictionary,
}

impl SeedNamer {
    /// Builds a namer over the EFF long word list.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::WordList`] when the dictionary cannot be built.
    ///
    /// # Example
    ///
    /// ```
    /// use rise_data::registry_update::SeedNamer;
    ///
    /// let namer = SeedNamer::new().expect("word list builds");
    /// let name = namer.name_for(2026);
    /// assert!(name.contains('-'));
    /// assert_eq!(name, namer.name_for(2026));
    /// ```
    pub fn new() -> Result<Self, ProfileError> {
        let dictionary = WordDictionary::builder()
            .words_from_str(wordlists::EFF_LONG)
            .delimiter("-")
            .case_sensitive(false)
            .build()
            .map_err(|message| ProfileError::WordList { message })?;
        Ok(Self { dictionary })
    }

    /// Returns the name for `seed`.
    #[must_use]
    pub fn name_for(&self, seed: u64) -> String {
        word::encode(seed.to_string().as_bytes(), &self.dictionary)
    }
}

/// Adds a profile to the registry at `path`, replacing the file atomically.
///
/// # Errors
///
/// Returns [`ProfileError::Registry`] when the registry cannot be read, is
/// invalid, already holds the name, or cannot be written. Derived names
/// report [`ProfileError::NameTaken`] or [`ProfileError::NamesExhausted`]
/// on collision.
pub fn add_profile(path: &Utf8Path, request: &ProfileRequest) -> Result<AddedProfile, ProfileError> {
    add_profile_with(path, request, || rand::rng().random())
}

fn add_profile_with(
    path: &Utf8Path,
    request: &ProfileRequest,
    next_seed: impl FnMut() -> u64,
) -> Result<AddedProfile, ProfileError> {
    let (dir, file_name) = open_parent_dir(path).map_err(|err| RegistryError::IoError {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let file = Utf8Path::new(file_name);
    let registry = SeedRegistry::from_file(&dir, file)?;

    let (name, seed) = choose_identity(&registry, request, next_seed)?;
    let profile = SeedDefinition::new(name.clone(), seed).with_counts(request.counts);
    registry.append_seed(profile)?.write_to_file(&dir, file)?;

    Ok(AddedProfile {
        name,
        seed,
        counts: request.counts,
        registry: path.to_path_buf(),
    })
}

fn choose_identity(
    registry: &SeedRegistry,
    request: &ProfileRequest,
    mut next_seed: impl FnMut() -> u64,
) -> Result<(String, u64), ProfileError> {
    if let Some(name) = &request.name {
        return Ok((name.clone(), request.seed.unwrap_or_else(next_seed)));
    }
    let namer = SeedNamer::new()?;
    let is_taken = |name: &str| registry.find_seed(name).is_ok();

    if let Some(seed) = request.seed {
        let name = namer.name_for(seed);
        if is_taken(&name) {
            return Err(ProfileError::NameTaken { name, seed });
        }
        return Ok((name, seed));
    }

    (0..NAME_ATTEMPTS)
        .map(|_| next_seed())
        .map(|seed| (namer.name_for(seed), seed))
        .find(|(name, _)| !is_taken(name))
        .ok_or(ProfileError::NamesExhausted {
            attempts: NAME_ATTEMPTS,
        })
}
