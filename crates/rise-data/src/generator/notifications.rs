//! Templated notifications addressed to random users.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use super::{days_before, sequential_id};
use crate::error::GenerationError;
use crate::model::{Notification, NotificationType, Project, User};

struct Template {
    kind: NotificationType,
    title: &'static str,
    message: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        kind: NotificationType::ReturnsCredited,
        title: "Monthly Returns Credited",
        message: "₱{amount} rental income from {project}",
    },
    Template {
        kind: NotificationType::NewOpportunity,
        title: "New Investment Opportunity",
        message: "{project} now open for investment",
    },
    Template {
        kind: NotificationType::ProjectUpdate,
        title: "Project Update",
        message: "{project} posted a new construction update",
    },
    Template {
        kind: NotificationType::FundingMilestone,
        title: "Funding Milestone",
        message: "{project} reached {percentage}% funding!",
    },
];

pub(super) fn generate_notifications(
    rng: &mut ChaCha8Rng,
    count: usize,
    users: &[User],
    projects: &[Project],
    anchor: DateTime<Utc>,
) -> Result<Vec<Notification>, GenerationError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if projects.is_empty() {
        return Err(GenerationError::NoProjects {
            entity: "notifications",
        });
    }

    let mut notifications = Vec::with_capacity(count);
    for index in 1..=count {
        let (Some(user), Some(project), Some(template)) = (
            users.choose(rng),
            projects.choose(rng),
            TEMPLATES.choose(rng),
        ) else {
            return Err(GenerationError::NoProjects {
                entity: "notifications",
            });
        };

        let amount = group_thousands(rng.random_range(1_000..51_000));
        let percentage = rng.random_range(70..100_u32).to_string();
        let message = template
            .message
            .replace("{project}", &project.title)
            .replace("{amount}", &amount)
            .replace("{percentage}", &percentage);
        let action_url = if template.kind == NotificationType::NewOpportunity {
            format!("/investor/project/{}", project.id)
        } else {
            "/investor/portfolio".to_owned()
        };

        notifications.push(Notification {
            id: sequential_id("notif", index),
            user_id: user.id.clone(),
            kind: template.kind,
            title: template.title.to_owned(),
            message,
            timestamp: days_before(rng, anchor, 30),
            read: rng.random_ratio(3, 5),
            action_url: Some(action_url),
        });
    }
    Ok(notifications)
}

/// Formats a number with comma thousands separators, e.g. `12,345`.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "digit grouping is defined by position modulo three"
)]
pub(super) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
