//! An investor's holdings and returns.

use rise_data::model::{Investment, Project, Transaction, User};

use crate::domain::AppState;

/// One invested project with the position that backs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Position<'a> {
    /// The project.
    pub project: &'a Project,
    /// The user's first investment in the project.
    pub investment: &'a Investment,
    /// Payouts received on that investment.
    pub returns: u64,
    /// Principal plus payouts.
    pub current_value: u64,
    /// Payouts relative to principal, in percent.
    pub profit_percent: f64,
}

/// Everything the portfolio screen shows for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio<'a> {
    /// The user's investments in stored order.
    pub investments: Vec<&'a Investment>,
    /// The user's ledger entries in stored order.
    pub transactions: Vec<&'a Transaction>,
    /// Projects the user holds a position in, in catalogue order.
    pub positions: Vec<Position<'a>>,
    /// Sum of the user's investment amounts.
    pub total_invested: u64,
    /// Sum of every payout across the user's investments.
    pub total_returns: u64,
    /// Returns relative to the user's recorded total invested, in percent.
    ///
    /// Zero when there are no returns or no recorded total.
    pub change_percent: f64,
}

/// Builds the portfolio view for `user`.
#[must_use]
pub fn portfolio<'a>(state: &'a AppState, user: &User) -> Portfolio<'a> {
    let investments: Vec<&Investment> = state
        .investments
        .iter()
        .filter(|investment| investment.user_id == user.id)
        .collect();
    let transactions = state
        .transactions
        .iter()
        .filter(|transaction| transaction.user_id == user.id)
        .collect();
    let positions = state
        .projects
        .iter()
        .filter_map(|project| {
            investments
                .iter()
                .find(|investment| investment.project_id == project.id)
                .map(|investment| position(project, investment))
        })
        .collect();
    let total_invested = investments.iter().map(|investment| investment.amount).sum();
    let total_returns = investments
        .iter()
        .map(|investment| investment.total_returns())
        .sum();

    Portfolio {
        investments,
        transactions,
        positions,
        total_invested,
        total_returns,
        change_percent: percent_of(total_returns, user.stats.total_invested),
    }
}

fn position<'a>(project: &'a Project, investment: &'a Investment) -> Position<'a> {
    let returns = investment.total_returns();
    Position {
        project,
        investment,
        returns,
        current_value: investment.amount.saturating_add(returns),
        profit_percent: percent_of(returns, investment.amount),
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "percentages are for display"
)]
fn percent_of(part: u64, whole: u64) -> f64 {
    if part == 0 || whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
