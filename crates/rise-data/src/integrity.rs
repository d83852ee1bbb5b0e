//! Referential integrity checks over a dataset.
//!
//! The generator runs these checks before returning, and the store exposes
//! them so mutated state can be audited the same way.
//!
//! # Rules
//!
//! - Identifiers are unique within each collection
//! - Investments, transactions and notifications reference existing users
//! - Investments and project-scoped transactions reference existing projects
//! - Investment shares equal amount divided by the project's target amount
//! - Investments and investment transactions mirror each other one-to-one

use std::collections::HashSet;

use crate::error::IntegrityError;
use crate::model::{Dataset, Investment, Project, TransactionType};

/// Largest accepted difference between recorded and derived shares.
pub const SHARES_TOLERANCE: f64 = 1e-12;

/// Validates every integrity rule, failing on the first violation.
///
/// # Errors
///
/// Returns the first [`IntegrityError`] encountered.
///
/// # Example
///
/// ```
/// use rise_data::{Dataset, validate_dataset};
///
/// assert!(validate_dataset(&Dataset::default()).is_ok());
/// ```
pub fn validate_dataset(dataset: &Dataset) -> Result<(), IntegrityError> {
    ensure_unique("user", dataset.users.iter().map(|u| u.id.as_str()))?;
    ensure_unique("project", dataset.projects.iter().map(|p| p.id.as_str()))?;
    ensure_unique(
        "investment",
        dataset.investments.iter().map(|i| i.id.as_str()),
    )?;
    ensure_unique(
        "transaction",
        dataset.transactions.iter().map(|t| t.id.as_str()),
    )?;
    ensure_unique(
        "notification",
        dataset.notifications.iter().map(|n| n.id.as_str()),
    )?;

    let user_ids: HashSet<&str> = dataset.users.iter().map(|u| u.id.as_str()).collect();

    for investment in &dataset.investments {
        ensure_user(&user_ids, "investment", &investment.id, &investment.user_id)?;
        let project = dataset.project(&investment.project_id).ok_or_else(|| {
            IntegrityError::UnknownProject {
                collection: "investment",
                entity_id: investment.id.clone(),
                project_id: investment.project_id.clone(),
            }
        })?;
        ensure_shares(investment, project)?;
        if !dataset
            .transactions
            .iter()
            .any(|transaction| transaction.mirrors(investment))
        {
            return Err(IntegrityError::MissingTransaction {
                investment_id: investment.id.clone(),
            });
        }
    }

    for transaction in &dataset.transactions {
        ensure_user(
            &user_ids,
            "transaction",
            &transaction.id,
            &transaction.user_id,
        )?;
        if let Some(project_id) = &transaction.project_id {
            if dataset.project(project_id).is_none() {
                return Err(IntegrityError::UnknownProject {
                    collection: "transaction",
                    entity_id: transaction.id.clone(),
                    project_id: project_id.clone(),
                });
            }
        }
        if transaction.kind == TransactionType::Investment
            && !dataset
                .investments
                .iter()
                .any(|investment| transaction.mirrors(investment))
        {
            return Err(IntegrityError::UnmatchedTransaction {
                transaction_id: transaction.id.clone(),
            });
        }
    }

    for notification in &dataset.notifications {
        ensure_user(
            &user_ids,
            "notification",
            &notification.id,
            &notification.user_id,
        )?;
    }

    Ok(())
}

/// Derives the ownership fraction an amount buys in a project.
///
/// Returns `0.0` for a project without a target, which cannot occur in
/// generated data.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "peso amounts stay far below 2^52 and shares are fractional by definition"
)]
pub fn shares_for(amount: u64, project: &Project) -> f64 {
    let target = project.financial.target_amount;
    if target == 0 {
        return 0.0;
    }
    amount as f64 / target as f64
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(IntegrityError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

fn ensure_user(
    user_ids: &HashSet<&str>,
    collection: &'static str,
    entity_id: &str,
    user_id: &str,
) -> Result<(), IntegrityError> {
    if user_ids.contains(user_id) {
        Ok(())
    } else {
        Err(IntegrityError::UnknownUser {
            collection,
            entity_id: entity_id.to_owned(),
            user_id: user_id.to_owned(),
        })
    }
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison on shares")]
fn ensure_shares(investment: &Investment, project: &Project) -> Result<(), IntegrityError> {
    let expected = shares_for(investment.amount, project);
    if (investment.shares - expected).abs() > SHARES_TOLERANCE {
        return Err(IntegrityError::SharesMismatch {
            investment_id: investment.id.clone(),
            expected,
            actual: investment.shares,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::generator::generate_dataset;
    use crate::registry::{EntityCounts, SeedDefinition};

    #[fixture]
    fn dataset() -> Dataset {
        let seed = SeedDefinition::new("integrity", 7).with_counts(EntityCounts {
            users: 10,
            projects: 4,
            investments: 12,
            notifications: 8,
        });
        let anchor = Utc
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid anchor");
        generate_dataset(&seed, anchor).expect("generation succeeds")
    }

    #[rstest]
    fn generated_dataset_is_valid(dataset: Dataset) {
        assert_eq!(validate_dataset(&dataset), Ok(()));
    }

    #[rstest]
    fn detects_duplicate_project_ids(mut dataset: Dataset) {
        let duplicate = dataset.projects.first().cloned().expect("a project");
        dataset.projects.push(duplicate.clone());

        assert_eq!(
            validate_dataset(&dataset),
            Err(IntegrityError::DuplicateId {
                collection: "project",
                id: duplicate.id,
            })
        );
    }

    #[rstest]
    fn detects_dangling_project_reference(mut dataset: Dataset) {
        let investment = dataset.investments.first_mut().expect("an investment");
        investment.project_id = "proj_missing".to_owned();
        let id = investment.id.clone();

        assert_eq!(
            validate_dataset(&dataset),
            Err(IntegrityError::UnknownProject {
                collection: "investment",
                entity_id: id,
                project_id: "proj_missing".to_owned(),
            })
        );
    }

    #[rstest]
    fn detects_notification_for_unknown_user(mut dataset: Dataset) {
        let notification = dataset.notifications.first_mut().expect("a notification");
        notification.user_id = "user_missing".to_owned();

        assert!(matches!(
            validate_dataset(&dataset),
            Err(IntegrityError::UnknownUser {
                collection: "notification",
                ..
            })
        ));
    }

    #[rstest]
    fn detects_tampered_shares(mut dataset: Dataset) {
        let investment = dataset.investments.first_mut().expect("an investment");
        investment.shares *= 2.0;

        assert!(matches!(
            validate_dataset(&dataset),
            Err(IntegrityError::SharesMismatch { .. })
        ));
    }

    #[rstest]
    fn detects_missing_mirror_transaction(mut dataset: Dataset) {
        let removed = dataset.transactions.remove(0);
        let orphan = dataset
            .investments
            .iter()
            .find(|investment| removed.mirrors(investment))
            .map(|investment| investment.id.clone())
            .expect("removed transaction mirrored an investment");

        let result = validate_dataset(&dataset);
        // Another transaction may mirror an identical investment; otherwise the
        // orphaned investment must be reported.
        if let Err(err) = result {
            assert_eq!(
                err,
                IntegrityError::MissingTransaction {
                    investment_id: orphan
                }
            );
        }
    }

    #[rstest]
    fn shares_for_zero_target_is_zero(mut dataset: Dataset) {
        let mut project = dataset.projects.remove(0);
        project.financial.target_amount = 0;
        assert!(shares_for(10_000, &project).abs() < f64::EPSILON);
    }
}
