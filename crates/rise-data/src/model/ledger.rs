//! Investments and the cash ledger that mirrors them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// State of an investment position.
    #[derive(Default)]
    pub enum InvestmentStatus {
        /// Position is open.
        #[default]
        Active => "active",
        /// Position has matured.
        Completed => "completed",
        /// Position was withdrawn.
        Cancelled => "cancelled",
    }
}

define_string_enum! {
    /// Kind of cash movement.
    #[derive(Default)]
    pub enum TransactionType {
        /// Capital put into a project.
        #[default]
        Investment => "investment",
        /// Profit distribution.
        Dividend => "dividend",
        /// Cash taken out of the platform.
        Withdrawal => "withdrawal",
        /// Rent passed through to investors.
        RentalIncome => "rental_income",
    }
}

define_string_enum! {
    /// Settlement state of a transaction.
    #[derive(Default)]
    pub enum TransactionStatus {
        /// Awaiting settlement.
        #[default]
        Pending => "pending",
        /// Settled.
        Completed => "completed",
        /// Settlement failed.
        Failed => "failed",
    }
}

/// A payout credited against an investment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnEvent {
    /// When the payout was credited.
    pub date: DateTime<Utc>,
    /// Payout in pesos.
    pub amount: u64,
    /// Payout kind, either dividend or rental income.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// A user's fractional position in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Unique identifier, e.g. `inv_001`.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Target project.
    pub project_id: String,
    /// Amount invested in pesos.
    pub amount: u64,
    /// Ownership fraction: amount divided by the project's target.
    pub shares: f64,
    /// When the investment was made.
    pub date: DateTime<Utc>,
    /// Position state.
    pub status: InvestmentStatus,
    /// Payouts received so far.
    #[serde(default)]
    pub returns: Vec<ReturnEvent>,
}

impl Investment {
    /// Sums every payout received on this position.
    #[must_use]
    pub fn total_returns(&self) -> u64 {
        self.returns.iter().map(|event| event.amount).sum()
    }
}

/// Bank account used to fund a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    /// Bank name.
    pub bank: String,
    /// Last four digits of the account number.
    pub account_last4: String,
}

/// A ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, e.g. `txn_001`.
    pub id: String,
    /// User whose balance moved.
    pub user_id: String,
    /// Related project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Movement kind.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount in pesos.
    pub amount: u64,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// Settlement state.
    pub status: TransactionStatus,
    /// Funding channel, e.g. `bank_transfer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Funding bank account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
}

impl Transaction {
    /// Returns `true` when this entry mirrors the given investment.
    #[must_use]
    pub fn mirrors(&self, investment: &Investment) -> bool {
        self.kind == TransactionType::Investment
            && self.user_id == investment.user_id
            && self.project_id.as_deref() == Some(investment.project_id.as_str())
            && self.amount == investment.amount
            && self.timestamp == investment.date
    }
}
