//! Deterministic dataset generation from seed definitions.
//!
//! The generator produces users, projects, investments, transactions and
//! notifications that reference each other consistently. The same seed and
//! anchor instant always produce identical output, and every dataset passes
//! [`validate_dataset`](crate::validate_dataset) before it is returned.

mod ledger;
mod notifications;
mod pools;
mod projects;
mod users;


use chrono::{DateTime, Duration, Utc};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::integrity::validate_dataset;
use crate::model::Dataset;
use crate::registry::SeedDefinition;

/// Milliseconds in one day.
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Generates a complete dataset from a seed definition.
///
/// Timestamps are computed relative to `anchor`, so callers that need a
/// stable dataset should pass a fixed instant rather than the current time.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Investments are requested but no investor accounts exist
/// - Investments or notifications are requested but no projects exist
/// - The generated dataset fails the referential integrity check
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rise_data::{SeedDefinition, generate_dataset};
///
/// let seed = SeedDefinition::new("demo", 2024);
/// let anchor = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid date");
///
/// let first = generate_dataset(&seed, anchor).expect("generated");
/// let second = generate_dataset(&seed, anchor).expect("generated");
///
/// assert_eq!(first.projects.len(), 25);
/// assert_eq!(first, second);
/// ```
pub fn generate_dataset(
    seed_def: &SeedDefinition,
    anchor: DateTime<Utc>,
) -> Result<Dataset, GenerationError> {
    let counts = seed_def.counts();
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let users = users::generate_users(&mut rng, counts.users, anchor);
    let projects = projects::generate_projects(&mut rng, counts.projects, anchor);
    let (investments, transactions) =
        ledger::generate_ledger(&mut rng, counts.investments, &users, &projects, anchor)?;
    let notifications = notifications::generate_notifications(
        &mut rng,
        counts.notifications,
        &users,
        &projects,
        anchor,
    )?;

    let dataset = Dataset {
        users,
        projects,
        investments,
        transactions,
        notifications,
    };
    validate_dataset(&dataset)?;
    Ok(dataset)
}

/// Formats a sequential identifier such as `proj_007`.
fn sequential_id(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:03}")
}

/// Picks one value from a non-empty pool.
///
/// Pools are compile-time constants, so the default is never observed.
fn pick<T: Copy + Default>(rng: &mut ChaCha8Rng, pool: &[T]) -> T {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Selects between `min_count` and `max_count` distinct values from `pool`.
///
/// Bounds are clamped to the pool size.
fn select_subset<T: Clone>(
    rng: &mut ChaCha8Rng,
    pool: &[T],
    min_count: usize,
    max_count: usize,
) -> Vec<T> {
    if pool.is_empty() {
        return Vec::new();
    }

    let clamped_min = min_count.min(pool.len());
    let clamped_max = max_count.min(pool.len());
    let count = if clamped_min == clamped_max {
        clamped_min
    } else {
        rng.random_range(clamped_min..=clamped_max)
    };

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Returns an instant up to `max_days` before `anchor`.
fn days_before(rng: &mut ChaCha8Rng, anchor: DateTime<Utc>, max_days: i64) -> DateTime<Utc> {
    anchor - Duration::milliseconds(rng.random_range(0..max_days * MILLIS_PER_DAY))
}

/// Returns an instant between `min_days` and `max_days` after `anchor`.
fn days_after(
    rng: &mut ChaCha8Rng,
    anchor: DateTime<Utc>,
    min_days: i64,
    max_days: i64,
) -> DateTime<Utc> {
    anchor
        + Duration::milliseconds(
            rng.random_range(min_days * MILLIS_PER_DAY..max_days * MILLIS_PER_DAY),
        )
}
