//! Pre-trade figures shown in the invest dialog.

use rise_data::model::Project;
use thiserror::Error;

/// Errors raised when quoting an investment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The amount is below the project's minimum ticket.
    #[error("amount {amount} is below the minimum investment of {minimum}")]
    BelowMinimum {
        /// Requested amount.
        amount: u64,
        /// Project minimum.
        minimum: u64,
    },
}

/// Ownership and return figures for a prospective investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentQuote {
    /// Amount being quoted, in pesos.
    pub amount: u64,
    /// Ownership fraction the amount buys, in percent.
    pub ownership_percent: f64,
    /// Amount times the projected ROI, rounded down to whole pesos.
    pub projected_annual_return: u64,
    /// Target left to raise before this investment.
    pub remaining_capacity: u64,
    /// Whether the amount would push the project past its target.
    ///
    /// Informational only; the store accepts over-funding.
    pub exceeds_remaining: bool,
}

/// Quotes an investment of `amount` pesos in `project`.
///
/// # Errors
///
/// Returns [`QuoteError::BelowMinimum`] when `amount` is under the project's
/// minimum investment.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "ownership is a display percentage"
)]
pub fn quote(project: &Project, amount: u64) -> Result<InvestmentQuote, QuoteError> {
    let financial = &project.financial;
    if amount < financial.minimum_investment {
        return Err(QuoteError::BelowMinimum {
            amount,
            minimum: financial.minimum_investment,
        });
    }
    let ownership_percent = if financial.target_amount == 0 {
        0.0
    } else {
        amount as f64 / financial.target_amount as f64 * 100.0
    };
    let projected_annual_return = (u128::from(amount) * u128::from(financial.projected_roi))
        .checked_div(100)
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(u64::MAX);
    let remaining_capacity = financial
        .target_amount
        .saturating_sub(financial.current_amount);

    Ok(InvestmentQuote {
        amount,
        ownership_percent,
        projected_annual_return,
        remaining_capacity,
        exceeds_remaining: amount > remaining_capacity,
    })
}
