//! Errors returned by store actions.

use rise_data::GenerationError;
use rise_data::model::ProjectStatus;
use thiserror::Error;

use super::KycError;
use super::ports::{InvestmentGatewayError, SnapshotError};

/// Failures surfaced by [`crate::domain::Store`] actions.
///
/// Actions that fail leave the in-memory state as it was, except for
/// [`StoreError::Snapshot`], which is raised after the change was applied
/// in memory but could not be persisted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The action needs a logged-in user.
    #[error("no user is logged in")]
    NotAuthenticated,

    /// No project carries the identifier.
    #[error("project '{id}' not found")]
    ProjectNotFound {
        /// Requested identifier.
        id: String,
    },

    /// No notification carries the identifier.
    #[error("notification '{id}' not found")]
    NotificationNotFound {
        /// Requested identifier.
        id: String,
    },

    /// The lifecycle does not allow the requested status change.
    #[error("project '{id}' cannot move from {from} to {to}")]
    InvalidTransition {
        /// Project identifier.
        id: String,
        /// Current status.
        from: ProjectStatus,
        /// Requested status.
        to: ProjectStatus,
    },

    /// The project has no later lifecycle stage.
    #[error("project '{id}' is already completed")]
    LifecycleFinished {
        /// Project identifier.
        id: String,
    },

    /// The investment gateway failed or timed out.
    #[error(transparent)]
    Gateway(#[from] InvestmentGatewayError),

    /// The KYC application was incomplete or not allowed.
    #[error(transparent)]
    Kyc(#[from] KycError),

    /// Seeding the demo dataset failed.
    #[error("failed to generate demo data: {0}")]
    Generation(#[from] GenerationError),

    /// The state snapshot could not be read or written.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
