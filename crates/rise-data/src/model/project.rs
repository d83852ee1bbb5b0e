//! Real-estate offerings and their lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// Lifecycle stage of a project.
    ///
    /// Projects move strictly forward:
    /// `funding → funded → construction → completed`.
    #[derive(Default)]
    pub enum ProjectStatus {
        /// Accepting investments.
        #[default]
        Funding => "funding",
        /// Fully subscribed.
        Funded => "funded",
        /// Under construction.
        Construction => "construction",
        /// Turned over.
        Completed => "completed",
    }
}

impl ProjectStatus {
    /// Returns the stage that follows this one, or `None` once completed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rise_data::model::ProjectStatus;
    ///
    /// assert_eq!(ProjectStatus::Funding.next(), Some(ProjectStatus::Funded));
    /// assert_eq!(ProjectStatus::Completed.next(), None);
    /// ```
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Funding => Some(Self::Funded),
            Self::Funded => Some(Self::Construction),
            Self::Construction => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Returns `true` when moving from `self` to `target` is a single forward
    /// step in the lifecycle.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Returns `true` while the project still raises or spends capital.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Funding | Self::Construction)
    }
}

define_string_enum! {
    /// Property category.
    #[derive(Default)]
    pub enum PropertyType {
        /// Residential condominium.
        #[default]
        ResidentialCondo => "residential-condo",
        /// Commercial building.
        Commercial => "commercial",
        /// Mixed residential and commercial use.
        MixedUse => "mixed-use",
        /// Undeveloped land.
        Land => "land",
    }
}

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Where a project is located.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Street address.
    pub address: String,
    /// City or district.
    pub city: String,
    /// Region containing the city.
    pub region: String,
    /// Map position.
    pub coordinates: Coordinates,
}

/// Financial terms of an offering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    /// Amount the project aims to raise, in pesos.
    pub target_amount: u64,
    /// Amount raised so far, in pesos. May exceed the target.
    pub current_amount: u64,
    /// Smallest accepted investment, in pesos.
    pub minimum_investment: u64,
    /// Price per square metre, in pesos.
    pub price_per_sqm: u64,
    /// Average unit floor area in square metres.
    pub average_unit_size: u32,
    /// Projected return on investment, in percent.
    #[serde(rename = "projectedROI")]
    pub projected_roi: u32,
    /// Annual rental yield, in percent.
    pub annual_rental_yield: u32,
    /// Annual appreciation rate, in percent.
    pub appreciation_rate: u32,
}

/// Key dates of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// When the project was listed.
    pub listing_date: DateTime<Utc>,
    /// When funding closes.
    pub funding_deadline: DateTime<Utc>,
    /// When construction begins.
    pub construction_start: DateTime<Utc>,
    /// When units are handed over.
    pub turnover_date: DateTime<Utc>,
}

/// A compliance document attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// Document title.
    pub name: String,
    /// Whether the document has been checked.
    pub verified: bool,
}

/// An entry in a project's update feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    /// When the update was posted.
    pub date: DateTime<Utc>,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
}

/// A real-estate offering open to fractional investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier, e.g. `proj_001`.
    pub id: String,
    /// Marketing title.
    pub title: String,
    /// Developer company name.
    pub developer: String,
    /// Long-form description.
    pub description: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Site location.
    pub location: Location,
    /// Lifecycle stage.
    pub status: ProjectStatus,
    /// Property category.
    pub property_type: PropertyType,
    /// Number of units in the development.
    pub total_units: u32,
    /// Units still available while funding.
    pub available_units: u32,
    /// Financial terms.
    pub financial: Financials,
    /// Key dates.
    pub timeline: Timeline,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// Number of investments received.
    pub investors: u32,
    /// Compliance documents.
    pub documents: Vec<ProjectDocument>,
    /// Update feed, newest first.
    pub updates: Vec<ProjectUpdate>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ProjectStatus::Funding, ProjectStatus::Funded, true)]
    #[case(ProjectStatus::Funded, ProjectStatus::Construction, true)]
    #[case(ProjectStatus::Construction, ProjectStatus::Completed, true)]
    #[case(ProjectStatus::Funding, ProjectStatus::Construction, false)]
    #[case(ProjectStatus::Completed, ProjectStatus::Funded, false)]
    #[case(ProjectStatus::Funded, ProjectStatus::Funded, false)]
    #[case(ProjectStatus::Construction, ProjectStatus::Funding, false)]
    fn transition_table(
        #[case] from: ProjectStatus,
        #[case] to: ProjectStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(from.can_transition_to(to), expected);
    }

    #[test]
    fn only_funding_and_construction_are_active() {
        let active: Vec<_> = ProjectStatus::ALL
            .iter()
            .copied()
            .filter(|status| status.is_active())
            .collect();
        assert_eq!(
            active,
            vec![ProjectStatus::Funding, ProjectStatus::Construction]
        );
    }

    #[rstest]
    #[case(PropertyType::ResidentialCondo, "residential-condo")]
    #[case(PropertyType::MixedUse, "mixed-use")]
    fn property_type_keeps_hyphenated_spelling(#[case] kind: PropertyType, #[case] text: &str) {
        assert_eq!(kind.as_str(), text);
        assert_eq!(text.parse::<PropertyType>(), Ok(kind));
    }

    #[test]
    fn financials_use_roi_acronym_on_the_wire() {
        let json = serde_json::to_string(&Financials::default()).expect("serialize");
        assert!(json.contains("\"projectedROI\""));
        assert!(json.contains("\"targetAmount\""));
    }
}
