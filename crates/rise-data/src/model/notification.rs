//! User-targeted notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// Category of a notification.
    #[derive(Default)]
    pub enum NotificationType {
        /// A position changed.
        #[default]
        InvestmentUpdate => "investment_update",
        /// A new project opened for investment.
        NewOpportunity => "new_opportunity",
        /// A payout was credited.
        ReturnsCredited => "returns_credited",
        /// A project posted news.
        ProjectUpdate => "project_update",
        /// A project crossed a funding threshold.
        FundingMilestone => "funding_milestone",
    }
}

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier, e.g. `notif_001`.
    pub id: String,
    /// Recipient.
    pub user_id: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notification was raised.
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has seen it.
    pub read: bool,
    /// In-app link to follow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}
