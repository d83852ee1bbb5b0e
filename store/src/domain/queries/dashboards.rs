//! Developer and admin dashboard aggregates.

use rise_data::model::{
    KycStatus, Notification, Project, ProjectStatus, Transaction, TransactionStatus,
    TransactionType, User, UserRole,
};

use super::funding_progress;
use crate::domain::AppState;

const DEVELOPER_NOTIFICATION_LIMIT: usize = 5;
const RECENT_TRANSACTION_LIMIT: usize = 8;

/// Number of projects in each lifecycle stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Projects still raising capital.
    pub funding: usize,
    /// Fully subscribed projects.
    pub funded: usize,
    /// Projects under construction.
    pub construction: usize,
    /// Turned-over projects.
    pub completed: usize,
}

impl StatusCounts {
    /// Tallies the statuses of `projects`.
    #[must_use]
    pub fn tally<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut counts, project| {
                match project.status {
                    ProjectStatus::Funding => counts.funding += 1,
                    ProjectStatus::Funded => counts.funded += 1,
                    ProjectStatus::Construction => counts.construction += 1,
                    ProjectStatus::Completed => counts.completed += 1,
                }
                counts
            })
    }
}

/// Figures on a developer's landing screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperDashboard<'a> {
    /// Projects listed under the developer's name.
    pub projects: Vec<&'a Project>,
    /// Capital raised across those projects.
    pub total_raised: u64,
    /// Investments received across those projects.
    pub total_investors: u64,
    /// Mean funding progress in percent, 0 without projects.
    pub average_funding_progress: f64,
    /// Projects per lifecycle stage.
    pub status_counts: StatusCounts,
    /// Up to five unread notifications in stored order.
    pub unread_notifications: Vec<&'a Notification>,
}

/// Builds the developer dashboard for `developer`.
///
/// Projects are matched on the developer field equalling the user's display
/// name, which is how listings are attributed.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the average is a display percentage"
)]
pub fn developer_dashboard<'a>(state: &'a AppState, developer: &User) -> DeveloperDashboard<'a> {
    let projects: Vec<&Project> = state
        .projects
        .iter()
        .filter(|project| project.developer == developer.name)
        .collect();
    let total_raised = projects
        .iter()
        .map(|project| project.financial.current_amount)
        .sum();
    let total_investors = projects
        .iter()
        .map(|project| u64::from(project.investors))
        .sum();
    let average_funding_progress = if projects.is_empty() {
        0.0
    } else {
        projects
            .iter()
            .map(|project| funding_progress(project))
            .sum::<f64>()
            / projects.len() as f64
    };
    let unread_notifications = state
        .notifications
        .iter()
        .filter(|notification| notification.user_id == developer.id && !notification.read)
        .take(DEVELOPER_NOTIFICATION_LIMIT)
        .collect();

    DeveloperDashboard {
        status_counts: StatusCounts::tally(projects.iter().copied()),
        projects,
        total_raised,
        total_investors,
        average_funding_progress,
        unread_notifications,
    }
}

/// Figures on the admin landing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard<'a> {
    /// Registered accounts.
    pub total_users: usize,
    /// Accounts with the investor role.
    pub investors: usize,
    /// Accounts with the developer role.
    pub developers: usize,
    /// Accounts with verified KYC.
    pub verified_users: usize,
    /// Accounts awaiting KYC review.
    pub pending_verifications: usize,
    /// Sum of completed investment transactions.
    pub total_investment_volume: u64,
    /// Projects funding or under construction.
    pub active_projects: usize,
    /// Turned-over projects.
    pub completed_projects: usize,
    /// Latest eight completed transactions, newest first.
    pub recent_transactions: Vec<&'a Transaction>,
}

/// Builds the admin dashboard.
#[must_use]
pub fn admin_dashboard(state: &AppState) -> AdminDashboard<'_> {
    let count_role = |role: UserRole| state.users.iter().filter(|user| user.role == role).count();
    let count_kyc = |status: KycStatus| {
        state
            .users
            .iter()
            .filter(|user| user.kyc_status == status)
            .count()
    };
    let mut completed: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|transaction| transaction.status == TransactionStatus::Completed)
        .collect();
    let total_investment_volume = completed
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Investment)
        .map(|transaction| transaction.amount)
        .sum();
    completed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    completed.truncate(RECENT_TRANSACTION_LIMIT);

    AdminDashboard {
        total_users: state.users.len(),
        investors: count_role(UserRole::Investor),
        developers: count_role(UserRole::Developer),
        verified_users: count_kyc(KycStatus::Verified),
        pending_verifications: count_kyc(KycStatus::Pending),
        total_investment_volume,
        active_projects: state
            .projects
            .iter()
            .filter(|project| project.status.is_active())
            .count(),
        completed_projects: state
            .projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Completed)
            .count(),
        recent_transactions: completed,
    }
}

/// Platform-wide analytics figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformAnalytics {
    /// Registered accounts.
    pub total_users: usize,
    /// Listed projects.
    pub total_projects: usize,
    /// Sum of project targets.
    pub total_value: u64,
    /// Sum of capital raised.
    pub total_raised: u64,
    /// Accounts with the investor role.
    pub investors: usize,
    /// Accounts with the developer role.
    pub developers: usize,
    /// Capital raised per investor account, rounded down; 0 without investors.
    pub average_investment: u64,
    /// Capital raised as a percentage of total value; 0 without value.
    pub funding_percent: f64,
}

/// Builds the platform analytics figures.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the funding share is a display percentage"
)]
pub fn platform_analytics(state: &AppState) -> PlatformAnalytics {
    let total_value: u64 = state
        .projects
        .iter()
        .map(|project| project.financial.target_amount)
        .sum();
    let total_raised: u64 = state
        .projects
        .iter()
        .map(|project| project.financial.current_amount)
        .sum();
    let investors = state
        .users
        .iter()
        .filter(|user| user.role == UserRole::Investor)
        .count();
    let developers = state
        .users
        .iter()
        .filter(|user| user.role == UserRole::Developer)
        .count();
    let average_investment = u64::try_from(investors)
        .ok()
        .and_then(|count| total_raised.checked_div(count))
        .unwrap_or(0);
    let funding_percent = if total_value == 0 {
        0.0
    } else {
        total_raised as f64 / total_value as f64 * 100.0
    };

    PlatformAnalytics {
        total_users: state.users.len(),
        total_projects: state.projects.len(),
        total_value,
        total_raised,
        investors,
        developers,
        average_investment,
        funding_percent,
    }
}
