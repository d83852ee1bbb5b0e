//! Application state owned by the store.

use rise_data::Dataset;
use rise_data::model::{Investment, Notification, Project, Transaction, User, UserRole};
use serde::{Deserialize, Serialize};

/// Everything the client keeps in memory.
///
/// All fields except `is_loading` are persisted. Missing fields fall back to
/// their defaults when a snapshot is read, which keeps older documents
/// loadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// Logged-in account, if any.
    pub current_user: Option<User>,
    /// Role the session acts under.
    pub current_role: UserRole,
    /// Whether a session is active.
    pub is_authenticated: bool,
    /// Real-estate offerings.
    pub projects: Vec<Project>,
    /// Investment positions.
    pub investments: Vec<Investment>,
    /// Registered accounts.
    pub users: Vec<User>,
    /// Ledger entries.
    pub transactions: Vec<Transaction>,
    /// User-targeted messages, newest first once the store starts adding them.
    pub notifications: Vec<Notification>,
    /// Whether a long-running action is in flight. Never persisted.
    #[serde(skip)]
    pub is_loading: bool,
}

impl AppState {
    /// Finds a project by identifier.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub(crate) fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    /// Finds a user by identifier.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Replaces every collection with the contents of a dataset.
    ///
    /// Session fields are left untouched.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        let Dataset {
            users,
            projects,
            investments,
            transactions,
            notifications,
        } = dataset;
        self.users = users;
        self.projects = projects;
        self.investments = investments;
        self.transactions = transactions;
        self.notifications = notifications;
    }

    /// Copies the collections out as a dataset, e.g. for integrity checks.
    #[must_use]
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            users: self.users.clone(),
            projects: self.projects.clone(),
            investments: self.investments.clone(),
            transactions: self.transactions.clone(),
            notifications: self.notifications.clone(),
        }
    }
}
