//! Driven port for persisting the serializable slice of the store.

use crate::domain::AppState;

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading or writing state snapshots.
    pub enum SnapshotError {
        /// The snapshot could not be read from storage.
        Read { message: String } =>
            "failed to read state snapshot: {message}",
        /// The snapshot could not be written to storage.
        Write { message: String } =>
            "failed to write state snapshot: {message}",
        /// The stored bytes are not a valid snapshot document.
        Decode { message: String } =>
            "invalid state snapshot: {message}",
        /// The state could not be encoded.
        Encode { message: String } =>
            "failed to encode state snapshot: {message}",
        /// The snapshot declares a schema this build does not understand.
        UnsupportedVersion { found: u64 } =>
            "unsupported snapshot schema version {found}",
    }
}

/// Port for loading and saving [`AppState`] snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotRepository: Send + Sync {
    /// Load the persisted state, returning `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when storage fails or the document is not a
    /// supported snapshot.
    fn load(&self) -> Result<Option<AppState>, SnapshotError>;

    /// Replace the persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the state cannot be encoded or written.
    fn save(&self, state: &AppState) -> Result<(), SnapshotError>;
}

/// Fixture implementation that never persists anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSnapshotRepository;

impl SnapshotRepository for FixtureSnapshotRepository {
    fn load(&self) -> Result<Option<AppState>, SnapshotError> {
        Ok(None)
    }

    fn save(&self, _state: &AppState) -> Result<(), SnapshotError> {
        Ok(())
    }
}
