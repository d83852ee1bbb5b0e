//! Read-only views derived from store state.
//!
//! Each function mirrors a computation one of the client screens performs
//! (browse, portfolio, dashboards, the invest dialog) so callers get the same
//! numbers without re-implementing them.

mod browse;
mod dashboards;
mod portfolio;
mod quote;

use rise_data::model::{Notification, Project};

use super::AppState;

pub use browse::{BrowseFilter, ParseSortKeyError, SortKey, available_cities};
pub use dashboards::{
    AdminDashboard, DeveloperDashboard, PlatformAnalytics, StatusCounts, admin_dashboard,
    developer_dashboard, platform_analytics,
};
pub use portfolio::{Portfolio, Position, portfolio};
pub use quote::{InvestmentQuote, QuoteError, quote};

/// Share of a project's target raised so far, in percent.
///
/// Over-funded projects report more than 100. A project without a target
/// reports 0.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "progress is a display percentage"
)]
pub fn funding_progress(project: &Project) -> f64 {
    let target = project.financial.target_amount;
    if target == 0 {
        return 0.0;
    }
    project.financial.current_amount as f64 / target as f64 * 100.0
}

/// Notifications addressed to a user, newest first.
#[must_use]
pub fn notifications_for<'a>(state: &'a AppState, user_id: &str) -> Vec<&'a Notification> {
    let mut notifications: Vec<&Notification> = state
        .notifications
        .iter()
        .filter(|notification| notification.user_id == user_id)
        .collect();
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notifications
}

/// Number of unread notifications addressed to a user.
#[must_use]
pub fn unread_count(state: &AppState, user_id: &str) -> usize {
    state
        .notifications
        .iter()
        .filter(|notification| notification.user_id == user_id && !notification.read)
        .count()
}
