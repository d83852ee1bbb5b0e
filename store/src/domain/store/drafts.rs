//! Inputs for actions that create entities.

use rise_data::model::{
    Financials, Location, Notification, NotificationType, Project, ProjectDocument,
    ProjectStatus, ProjectUpdate, PropertyType, Timeline,
};
use serde::{Deserialize, Serialize};

/// A project listing without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    /// Marketing title.
    pub title: String,
    /// Developer company name.
    pub developer: String,
    /// Long-form description.
    pub description: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Site location.
    pub location: Location,
    /// Initial lifecycle stage.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Property category.
    pub property_type: PropertyType,
    /// Number of units in the development.
    pub total_units: u32,
    /// Units still available.
    pub available_units: u32,
    /// Financial terms.
    pub financial: Financials,
    /// Key dates.
    pub timeline: Timeline,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Investments already received.
    #[serde(default)]
    pub investors: u32,
    /// Compliance documents.
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
    /// Update feed.
    #[serde(default)]
    pub updates: Vec<ProjectUpdate>,
}

impl ProjectDraft {
    pub(super) fn into_project(self, id: String) -> Project {
        let Self {
            title,
            developer,
            description,
            images,
            location,
            status,
            property_type,
            total_units,
            available_units,
            financial,
            timeline,
            amenities,
            investors,
            documents,
            updates,
        } = self;
        Project {
            id,
            title,
            developer,
            description,
            images,
            location,
            status,
            property_type,
            total_units,
            available_units,
            financial,
            timeline,
            amenities,
            investors,
            documents,
            updates,
        }
    }
}

/// A notification without an identifier or timestamp.
///
/// The store stamps the notification with its clock when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    /// Recipient.
    pub user_id: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the recipient has already seen it.
    #[serde(default)]
    pub read: bool,
    /// In-app link to follow.
    #[serde(default)]
    pub action_url: Option<String>,
}

impl NotificationDraft {
    pub(super) fn into_notification(
        self,
        id: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            timestamp,
            read: self.read,
            action_url: self.action_url,
        }
    }
}
