//! Entity model for the Rise platform.
//!
//! Every type serializes to the camelCase JSON shape consumed by the web
//! client, and enum values keep their exact wire spellings
//! (`residential-condo`, `rental_income`, ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[macro_use]
mod macros;
mod ledger;
mod notification;
mod project;
mod user;

pub use ledger::{
    BankDetails, Investment, InvestmentStatus, ReturnEvent, Transaction, TransactionStatus,
    TransactionType,
};
pub use notification::{Notification, NotificationType};
pub use project::{
    Coordinates, Financials, Location, Project, ProjectDocument, ProjectStatus, ProjectUpdate,
    PropertyType, Timeline,
};
pub use user::{KycStatus, RiskProfile, User, UserPreferences, UserRole, UserStats};

/// Error returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {input}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

/// A complete set of platform collections.
///
/// Produced by the generator and held by the state store. Collections keep
/// insertion order, which the store relies on for "latest first" views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Registered accounts.
    pub users: Vec<User>,
    /// Real-estate offerings.
    pub projects: Vec<Project>,
    /// Investment positions.
    pub investments: Vec<Investment>,
    /// Ledger entries.
    pub transactions: Vec<Transaction>,
    /// User-targeted messages.
    pub notifications: Vec<Notification>,
}

impl Dataset {
    /// Finds a user by identifier.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Finds a project by identifier.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}
