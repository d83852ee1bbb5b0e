//! JSON snapshot persistence on the local filesystem.
//!
//! Documents are written as `{"schemaVersion": 1, "state": {...}}`. Older
//! documents without a schema version are migrated on read: either the bare
//! state object, or the `{"state": ..., "version": 0}` envelope the web
//! client's storage layer produced. Decoded state is checked with the
//! dataset integrity rules before it is handed to the store.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rise_data::{open_parent_dir, validate_dataset, write_atomic};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::AppState;
use crate::domain::ports::{SnapshotError, SnapshotRepository};

/// Schema version written by this build.
pub const SNAPSHOT_SCHEMA_VERSION: u64 = 1;

const SCHEMA_VERSION_KEY: &str = "schemaVersion";
const STATE_KEY: &str = "state";
const LEGACY_VERSION_KEY: &str = "version";
const STATE_KEYS: [&str; 8] = [
    "currentUser",
    "currentRole",
    "isAuthenticated",
    "projects",
    "investments",
    "users",
    "transactions",
    "notifications",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument<'a> {
    schema_version: u64,
    state: &'a AppState,
}

/// Encodes `state` as a current-schema snapshot document.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] when serialization fails.
pub fn encode_snapshot(state: &AppState) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(&SnapshotDocument {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        state,
    })
    .map_err(|err| SnapshotError::encode(err.to_string()))
}

/// Decodes a snapshot document, migrating unversioned documents.
///
/// The decoded collections must pass the dataset integrity rules.
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] for malformed documents, documents that
/// hold no recognizable state and states with broken references.
/// Returns [`SnapshotError::UnsupportedVersion`] for unknown schema versions.
///
/// # Examples
///
/// ```
/// use rise_store::outbound::decode_snapshot;
///
/// let legacy = r#"{"isAuthenticated": false, "currentRole": "developer"}"#;
/// let state = decode_snapshot(legacy).expect("legacy state migrates");
/// assert_eq!(state.current_role.as_str(), "developer");
///
/// assert!(decode_snapshot(r#"{"schemaVersion": 9, "state": {}}"#).is_err());
/// assert!(decode_snapshot(r#"{"hello": "world"}"#).is_err());
/// ```
pub fn decode_snapshot(text: &str) -> Result<AppState, SnapshotError> {
    let document: Value =
        serde_json::from_str(text).map_err(|err| SnapshotError::decode(err.to_string()))?;
    let fields = migrate(document)?;
    let state: AppState =
        serde_json::from_value(fields).map_err(|err| SnapshotError::decode(err.to_string()))?;
    validate_dataset(&state.to_dataset())
        .map_err(|err| SnapshotError::decode(format!("integrity check failed: {err}")))?;
    Ok(state)
}

/// Extracts the state object from any known document layout.
fn migrate(document: Value) -> Result<Value, SnapshotError> {
    let Value::Object(mut fields) = document else {
        return Err(SnapshotError::decode("snapshot must be a JSON object"));
    };
    if let Some(version) = fields.get(SCHEMA_VERSION_KEY) {
        let found = version
            .as_u64()
            .ok_or_else(|| SnapshotError::decode("schemaVersion must be a whole number"))?;
        if found != SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::unsupported_version(found));
        }
        return fields
            .remove(STATE_KEY)
            .ok_or_else(|| SnapshotError::decode("snapshot is missing its state"));
    }
    if let Some(state @ Value::Object(_)) = fields.remove(STATE_KEY) {
        debug!(
            legacy_version = ?fields.get(LEGACY_VERSION_KEY),
            "migrating client storage envelope"
        );
        return Ok(state);
    }
    if !STATE_KEYS.iter().any(|key| fields.contains_key(*key)) {
        return Err(SnapshotError::decode("snapshot holds no recognizable state"));
    }
    debug!("migrating bare state snapshot");
    Ok(Value::Object(fields))
}

/// Snapshot repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: Utf8PathBuf,
}

impl SnapshotFile {
    /// Creates a repository for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_error(&self, err: &io::Error) -> SnapshotError {
        SnapshotError::read(format!("{}: {err}", self.path))
    }

    fn write_error(&self, err: &io::Error) -> SnapshotError {
        SnapshotError::write(format!("{}: {err}", self.path))
    }

    fn ensure_parent_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => {
                Dir::create_ambient_dir_all(parent, ambient_authority())
            }
            _ => Ok(()),
        }
    }
}

impl SnapshotRepository for SnapshotFile {
    fn load(&self) -> Result<Option<AppState>, SnapshotError> {
        let (dir, file_name) = match open_parent_dir(&self.path) {
            Ok(opened) => opened,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.read_error(&err)),
        };
        let text = match dir.read_to_string(file_name) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.read_error(&err)),
        };
        let state = decode_snapshot(&text)?;
        info!(path = %self.path, "loaded state snapshot");
        Ok(Some(state))
    }

    fn save(&self, state: &AppState) -> Result<(), SnapshotError> {
        let contents = encode_snapshot(state)?;
        self.ensure_parent_dir()
            .map_err(|err| self.write_error(&err))?;
        let (dir, file_name) = open_parent_dir(&self.path).map_err(|err| self.write_error(&err))?;
        write_atomic(&dir, Utf8Path::new(file_name), &contents)
            .map_err(|err| self.write_error(&err))?;
        debug!(path = %self.path, bytes = contents.len(), "saved state snapshot");
        Ok(())
    }
}
