//! Hand-built entities for domain unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rise_data::model::{
    Coordinates, Financials, Investment, InvestmentStatus, KycStatus, Location, Notification,
    NotificationType, Project, ProjectStatus, PropertyType, ReturnEvent, Timeline, Transaction,
    TransactionStatus, TransactionType, User, UserPreferences, UserRole, UserStats,
};

use super::AppState;

/// Clock pinned to a fixed instant.
pub(crate) struct FixtureClock {
    pub(crate) utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Midnight UTC on the given day of March 2024.
pub(crate) fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

pub(crate) fn user(id: &str, name: &str, role: UserRole) -> User {
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        email: format!("{id}@example.com"),
        phone: "+639170000000".to_owned(),
        avatar: String::new(),
        role,
        kyc_status: KycStatus::Verified,
        verification_date: Some(day(1)),
        stats: UserStats::default(),
        investment_history: Vec::new(),
        preferences: UserPreferences::default(),
        badges: Vec::new(),
    }
}

pub(crate) fn project(id: &str) -> Project {
    Project {
        id: id.to_owned(),
        title: format!("Tower {id}"),
        developer: "Ayala Land".to_owned(),
        description: "A residential tower in the heart of the city.".to_owned(),
        images: Vec::new(),
        location: Location {
            address: "1 Ayala Avenue".to_owned(),
            city: "Makati".to_owned(),
            region: "Metro Manila".to_owned(),
            coordinates: Coordinates {
                lat: 14.5547,
                lng: 121.0244,
            },
        },
        status: ProjectStatus::Funding,
        property_type: PropertyType::ResidentialCondo,
        total_units: 200,
        available_units: 40,
        financial: Financials {
            target_amount: 100_000_000,
            current_amount: 50_000_000,
            minimum_investment: 25_000,
            price_per_sqm: 150_000,
            average_unit_size: 45,
            projected_roi: 12,
            annual_rental_yield: 6,
            appreciation_rate: 5,
        },
        timeline: Timeline {
            listing_date: day(1),
            funding_deadline: day(20),
            construction_start: day(25),
            turnover_date: day(30),
        },
        amenities: Vec::new(),
        investors: 10,
        documents: Vec::new(),
        updates: Vec::new(),
    }
}

pub(crate) fn investment(id: &str, user_id: &str, project_id: &str, amount: u64) -> Investment {
    Investment {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        project_id: project_id.to_owned(),
        amount,
        shares: 0.0,
        date: day(2),
        status: InvestmentStatus::Active,
        returns: Vec::new(),
    }
}

pub(crate) fn payout(amount: u64) -> ReturnEvent {
    ReturnEvent {
        date: day(3),
        amount,
        kind: TransactionType::Dividend,
    }
}

pub(crate) fn transaction(id: &str, user_id: &str, amount: u64, at: u32) -> Transaction {
    Transaction {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        project_id: Some("proj_001".to_owned()),
        kind: TransactionType::Investment,
        amount,
        timestamp: day(at),
        status: TransactionStatus::Completed,
        payment_method: Some("gcash".to_owned()),
        bank_details: None,
    }
}

pub(crate) fn notification(id: &str, user_id: &str, at: u32, read: bool) -> Notification {
    Notification {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        kind: NotificationType::ProjectUpdate,
        title: "Project Update".to_owned(),
        message: "Construction is on schedule.".to_owned(),
        timestamp: day(at),
        read,
        action_url: None,
    }
}

/// Default state customised by `edit`.
pub(crate) fn state_with(edit: impl FnOnce(&mut AppState)) -> AppState {
    let mut state = AppState::default();
    edit(&mut state);
    state
}
