//! Deterministic demo data for the Rise fractional real-estate platform.
//!
//! This crate owns the entity model shared by the platform (users, projects,
//! investments, transactions and notifications) and a seeded generator that
//! produces an internally consistent, cross-referenced dataset. It is kept
//! free of store and runtime concerns so it can be consumed by any front end.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading named seed profiles from a versioned JSON registry
//! - Deterministic dataset generation from a seed and an anchor instant
//! - Referential integrity checks over generated or mutated datasets
//! - Atomic, capability-scoped file writes for registries and snapshots
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use rise_data::{SeedRegistry, generate_dataset};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{"name": "test-seed", "seed": 42, "userCount": 5, "projectCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let anchor = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid date");
//! let dataset = generate_dataset(seed_def, anchor).expect("generation succeeds");
//!
//! // Three fixed demo accounts precede the generated users.
//! assert_eq!(dataset.users.len(), 8);
//! assert_eq!(dataset.projects.len(), 3);
//! ```

mod atomic_io;
mod error;
mod generator;
mod integrity;
pub mod model;
mod registry;
pub mod registry_update;

pub use atomic_io::{open_parent_dir, write_atomic};
pub use error::{GenerationError, IntegrityError, RegistryError};
pub use generator::generate_dataset;
pub use integrity::{SHARES_TOLERANCE, shares_for, validate_dataset};
pub use model::Dataset;
pub use registry::{EntityCounts, SeedDefinition, SeedRegistry};
