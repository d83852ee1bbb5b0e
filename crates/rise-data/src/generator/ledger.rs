//! Investments, their payouts and the mirrored transaction ledger.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use super::pools::{BANKS, PAYMENT_METHODS};
use super::{days_before, pick, sequential_id};
use crate::error::GenerationError;
use crate::integrity::shares_for;
use crate::model::{
    BankDetails, Investment, InvestmentStatus, Project, ReturnEvent, Transaction,
    TransactionStatus, TransactionType, User, UserRole,
};

/// Days between consecutive synthetic payouts.
const PAYOUT_INTERVAL_DAYS: i64 = 30;

/// Generates `count` investments and one mirrored transaction for each.
///
/// Owners are drawn from investor accounts only.
pub(super) fn generate_ledger(
    rng: &mut ChaCha8Rng,
    count: usize,
    users: &[User],
    projects: &[Project],
    anchor: DateTime<Utc>,
) -> Result<(Vec<Investment>, Vec<Transaction>), GenerationError> {
    if count == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let investors: Vec<&User> = users
        .iter()
        .filter(|user| user.role == UserRole::Investor)
        .collect();
    if investors.is_empty() {
        return Err(GenerationError::NoInvestors);
    }
    if projects.is_empty() {
        return Err(GenerationError::NoProjects {
            entity: "investments",
        });
    }

    let mut investments = Vec::with_capacity(count);
    let mut transactions = Vec::with_capacity(count);
    for index in 1..=count {
        let (Some(user), Some(project)) = (investors.choose(rng), projects.choose(rng)) else {
            return Err(GenerationError::NoInvestors);
        };
        let investment = random_investment(rng, index, user, project, anchor);
        transactions.push(mirror_transaction(rng, index, &investment));
        investments.push(investment);
    }
    Ok((investments, transactions))
}

fn random_investment(
    rng: &mut ChaCha8Rng,
    index: usize,
    user: &User,
    project: &Project,
    anchor: DateTime<Utc>,
) -> Investment {
    let amount = rng.random_range(25_000..525_000_u64);
    let date = days_before(rng, anchor, 365);
    let status = pick(rng, &[InvestmentStatus::Active, InvestmentStatus::Completed]);

    // Seven in ten positions have already paid out at least once.
    let returns = if rng.random_ratio(7, 10) {
        let payouts = rng.random_range(1..=6_i64);
        (0..payouts)
            .map(|month| ReturnEvent {
                date: date + Duration::days(month * PAYOUT_INTERVAL_DAYS),
                // Between 0.25% and 0.5% of the invested amount.
                amount: amount * rng.random_range(2_500..5_000_u64) / 1_000_000,
                kind: pick(
                    rng,
                    &[TransactionType::Dividend, TransactionType::RentalIncome],
                ),
            })
            .collect()
    } else {
        Vec::new()
    };

    Investment {
        id: sequential_id("inv", index),
        user_id: user.id.clone(),
        project_id: project.id.clone(),
        amount,
        shares: shares_for(amount, project),
        date,
        status,
        returns,
    }
}

fn mirror_transaction(rng: &mut ChaCha8Rng, index: usize, investment: &Investment) -> Transaction {
    Transaction {
        id: sequential_id("txn", index),
        user_id: investment.user_id.clone(),
        project_id: Some(investment.project_id.clone()),
        kind: TransactionType::Investment,
        amount: investment.amount,
        timestamp: investment.date,
        status: TransactionStatus::Completed,
        payment_method: Some(pick(rng, PAYMENT_METHODS).to_owned()),
        bank_details: Some(BankDetails {
            bank: pick(rng, BANKS).to_owned(),
            account_last4: format!("{:04}", rng.random_range(0..9_999_u32)),
        }),
    }
}
