//! Project browse filtering and ordering.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rise_data::model::{Project, ProjectStatus, PropertyType};
use thiserror::Error;

/// Ordering applied to browse results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Most recently listed first.
    #[default]
    Newest,
    /// Highest funding progress first.
    FundingProgress,
    /// Highest projected ROI first.
    Roi,
    /// Lowest minimum investment first.
    MinimumInvestment,
    /// Earliest funding deadline first.
    Deadline,
}

impl SortKey {
    /// Every key in menu order.
    pub const ALL: &'static [Self] = &[
        Self::Newest,
        Self::FundingProgress,
        Self::Roi,
        Self::MinimumInvestment,
        Self::Deadline,
    ];

    /// Returns the key's option value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::FundingProgress => "funding-progress",
            Self::Roi => "roi",
            Self::MinimumInvestment => "minimum-investment",
            Self::Deadline => "deadline",
        }
    }

    fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            Self::Newest => b.timeline.listing_date.cmp(&a.timeline.listing_date),
            Self::FundingProgress => compare_progress(b, a),
            Self::Roi => b.financial.projected_roi.cmp(&a.financial.projected_roi),
            Self::MinimumInvestment => a
                .financial
                .minimum_investment
                .cmp(&b.financial.minimum_investment),
            Self::Deadline => a
                .timeline
                .funding_deadline
                .cmp(&b.timeline.funding_deadline),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}'")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| ParseSortKeyError(value.to_owned()))
    }
}

/// Compares raised/target ratios exactly by cross-multiplying.
fn compare_progress(a: &Project, b: &Project) -> Ordering {
    let ratio = |project: &Project| match project.financial.target_amount {
        0 => (0_u128, 1_u128),
        target => (
            u128::from(project.financial.current_amount),
            u128::from(target),
        ),
    };
    let (a_current, a_target) = ratio(a);
    let (b_current, b_target) = ratio(b);
    (a_current * b_target).cmp(&(b_current * a_target))
}

/// Criteria from the browse screen.
///
/// Empty lists and `None` bounds do not filter.
///
/// # Examples
///
/// ```
/// use rise_store::domain::queries::{BrowseFilter, SortKey};
///
/// let filter = BrowseFilter {
///     search: Some("makati".to_owned()),
///     sort: SortKey::Roi,
///     ..BrowseFilter::default()
/// };
/// assert!(filter.apply(&[]).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilter {
    /// Case-insensitive text matched against title, description, city and
    /// developer. The text is matched as given; only an empty string is
    /// ignored.
    pub search: Option<String>,
    /// Accepted property types.
    pub property_types: Vec<PropertyType>,
    /// Accepted lifecycle stages.
    pub statuses: Vec<ProjectStatus>,
    /// Accepted cities, matched exactly.
    pub cities: Vec<String>,
    /// Lowest accepted minimum investment.
    pub min_investment: Option<u64>,
    /// Highest accepted minimum investment.
    pub max_investment: Option<u64>,
    /// Lowest accepted projected ROI, in percent. Fractional bounds are
    /// allowed.
    pub min_roi: Option<f64>,
    /// Result ordering.
    pub sort: SortKey,
}

impl BrowseFilter {
    /// Returns `true` when the project passes every criterion.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.matches_search(project)
            && (self.property_types.is_empty()
                || self.property_types.contains(&project.property_type))
            && (self.statuses.is_empty() || self.statuses.contains(&project.status))
            && (self.cities.is_empty() || self.cities.contains(&project.location.city))
            && self
                .min_investment
                .is_none_or(|min| project.financial.minimum_investment >= min)
            && self
                .max_investment
                .is_none_or(|max| project.financial.minimum_investment <= max)
            && self
                .min_roi
                .is_none_or(|min| f64::from(project.financial.projected_roi) >= min)
    }

    /// Filters and sorts projects. Ties keep their original order.
    #[must_use]
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let mut selected: Vec<&Project> = projects
            .iter()
            .filter(|project| self.matches(project))
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }

    fn matches_search(&self, project: &Project) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        [
            project.title.as_str(),
            project.description.as_str(),
            project.location.city.as_str(),
            project.developer.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Distinct project cities in alphabetical order.
#[must_use]
pub fn available_cities(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|project| project.location.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
