//! Driven adapters implementing the domain ports.

mod simulated_gateway;
mod snapshot_file;

pub use simulated_gateway::{DEFAULT_LATENCY, SimulatedGateway, SimulatedOutcome};
pub use snapshot_file::{SNAPSHOT_SCHEMA_VERSION, SnapshotFile, decode_snapshot, encode_snapshot};
