//! Error types for the rise-data crate.
//!
//! This module defines semantic error enums for registry parsing, dataset
//! generation and referential integrity checks, following the project's error
//! handling conventions with `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing, querying or writing a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry file could not be written.
    #[error("failed to write registry file at '{path}': {message}")]
    WriteError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// A seed with the same name already exists in the registry.
    #[error("seed '{name}' already exists in registry")]
    DuplicateSeedName {
        /// The seed name that collided.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during dataset generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Investments were requested but no investor accounts exist to own them.
    #[error("cannot generate investments without investor accounts")]
    NoInvestors,

    /// Investments or notifications were requested but no projects exist.
    #[error("cannot generate {entity} without projects")]
    NoProjects {
        /// The dependent entity that needed a project.
        entity: &'static str,
    },

    /// The generated dataset violated a referential integrity rule.
    #[error("generated dataset failed integrity check: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Referential integrity violations detected in a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityError {
    /// Two entities in the same collection share an identifier.
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId {
        /// Collection containing the duplicate.
        collection: &'static str,
        /// The duplicated identifier.
        id: String,
    },

    /// An entity references a user that does not exist.
    #[error("{collection} '{entity_id}' references unknown user '{user_id}'")]
    UnknownUser {
        /// Collection of the referencing entity.
        collection: &'static str,
        /// Identifier of the referencing entity.
        entity_id: String,
        /// The dangling user reference.
        user_id: String,
    },

    /// An entity references a project that does not exist.
    #[error("{collection} '{entity_id}' references unknown project '{project_id}'")]
    UnknownProject {
        /// Collection of the referencing entity.
        collection: &'static str,
        /// Identifier of the referencing entity.
        entity_id: String,
        /// The dangling project reference.
        project_id: String,
    },

    /// An investment's shares disagree with its amount and project target.
    #[error("investment '{investment_id}' has shares {actual}, expected {expected}")]
    SharesMismatch {
        /// Identifier of the investment.
        investment_id: String,
        /// Shares derived from amount and target.
        expected: f64,
        /// Shares recorded on the investment.
        actual: f64,
    },

    /// An investment has no transaction mirroring it.
    #[error("investment '{investment_id}' has no matching transaction")]
    MissingTransaction {
        /// Identifier of the investment.
        investment_id: String,
    },

    /// An investment transaction mirrors no investment.
    #[error("transaction '{transaction_id}' matches no investment")]
    UnmatchedTransaction {
        /// Identifier of the transaction.
        transaction_id: String,
    },
}
