//! Platform accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Investment, PropertyType};

define_string_enum! {
    /// Role an account acts under.
    #[derive(Default)]
    pub enum UserRole {
        /// Buys fractional shares in projects.
        #[default]
        Investor => "investor",
        /// Lists and manages projects.
        Developer => "developer",
        /// Operates the platform.
        Admin => "admin",
    }
}

define_string_enum! {
    /// Know-your-customer verification state.
    #[derive(Default)]
    pub enum KycStatus {
        /// Submitted and awaiting review.
        #[default]
        Pending => "pending",
        /// Identity confirmed.
        Verified => "verified",
        /// Submission refused.
        Rejected => "rejected",
    }
}

define_string_enum! {
    /// Investor appetite for risk.
    #[derive(Default)]
    pub enum RiskProfile {
        /// Prefers capital preservation.
        Conservative => "conservative",
        /// Balanced exposure.
        #[default]
        Moderate => "moderate",
        /// Seeks growth over safety.
        Aggressive => "aggressive",
    }
}

/// Aggregate figures shown on a user's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Total pesos invested to date.
    pub total_invested: u64,
    /// Number of positions still open.
    pub active_investments: u32,
    /// Total pesos returned to date.
    pub total_returns: u64,
    /// Current portfolio valuation in pesos.
    pub portfolio_value: u64,
}

/// Browsing preferences captured during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Preferred property categories.
    pub property_types: Vec<PropertyType>,
    /// Preferred cities.
    pub locations: Vec<String>,
    /// Declared risk appetite.
    pub risk_profile: RiskProfile,
}

/// A platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, e.g. `user_001`.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone in E.164 form.
    pub phone: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Role the account was registered with.
    pub role: UserRole,
    /// Verification state.
    pub kyc_status: KycStatus,
    /// When verification completed, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<DateTime<Utc>>,
    /// Dashboard aggregates.
    pub stats: UserStats,
    /// Historical positions; kept for shape compatibility and always empty.
    #[serde(default)]
    pub investment_history: Vec<Investment>,
    /// Browsing preferences.
    pub preferences: UserPreferences,
    /// Achievement labels.
    #[serde(default)]
    pub badges: Vec<String>,
}
