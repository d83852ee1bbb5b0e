//! Randomized project listings.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::pools::{
    AMENITIES, DEVELOPERS, PROJECT_IMAGES, PROPERTY_NAMES, STREETS, all_cities, city_names,
};
use super::{days_after, days_before, pick, select_subset, sequential_id};
use crate::model::{
    Coordinates, Financials, Location, Project, ProjectDocument, ProjectStatus, ProjectUpdate,
    PropertyType, Timeline,
};

/// Every listed project accepts the same minimum ticket.
const MINIMUM_INVESTMENT: u64 = 25_000;

/// Centre of the coordinate jitter, in central Makati.
const BASE_COORDINATES: Coordinates = Coordinates {
    lat: 14.5547,
    lng: 121.0244,
};

/// Half-width of the coordinate jitter in degrees.
const COORDINATE_SPREAD: f64 = 0.25;

pub(super) fn generate_projects(
    rng: &mut ChaCha8Rng,
    count: usize,
    anchor: DateTime<Utc>,
) -> Vec<Project> {
    let cities = all_cities();
    let names = city_names();
    (1..=count)
        .map(|index| random_project(rng, index, &cities, &names, anchor))
        .collect()
}

fn random_project(
    rng: &mut ChaCha8Rng,
    index: usize,
    cities: &[(&'static str, &'static str)],
    names: &[&'static str],
    anchor: DateTime<Utc>,
) -> Project {
    let (region, city) = pick(rng, cities);
    let status = pick(rng, ProjectStatus::ALL);
    let property_type = pick(rng, PropertyType::ALL);
    let funding = status == ProjectStatus::Funding;

    let target_amount = rng.random_range(100_000_000..2_100_000_000_u64);
    // Open projects have raised between 10% and 90% of their target.
    let current_amount = if funding {
        target_amount * rng.random_range(1_000..9_000_u64) / 10_000
    } else {
        target_amount
    };

    let title = format!("{} {}", pick(rng, PROPERTY_NAMES), pick(rng, names));
    let description = format!(
        "A premium {} development in the heart of {city}. This project features modern \
         architecture, world-class amenities, and strategic location perfect for investment \
         and lifestyle.",
        property_type.as_str().replacen('-', " ", 1)
    );

    let location = Location {
        address: format!(
            "{} {} Street",
            rng.random_range(1..1_000_u32),
            pick(rng, STREETS)
        ),
        city: city.to_owned(),
        region: region.to_owned(),
        coordinates: jitter(rng),
    };

    let financial = Financials {
        target_amount,
        current_amount,
        minimum_investment: MINIMUM_INVESTMENT,
        price_per_sqm: rng.random_range(150_000..350_000),
        average_unit_size: rng.random_range(30..110),
        projected_roi: rng.random_range(12..27),
        annual_rental_yield: rng.random_range(4..9),
        appreciation_rate: rng.random_range(8..16),
    };

    let timeline = Timeline {
        listing_date: days_before(rng, anchor, 180),
        funding_deadline: days_after(rng, anchor, 0, 180),
        construction_start: days_after(rng, anchor, 0, 365),
        turnover_date: days_after(rng, anchor, 730, 1_825),
    };

    Project {
        id: sequential_id("proj", index),
        title,
        developer: pick(rng, DEVELOPERS).to_owned(),
        description,
        images: PROJECT_IMAGES.iter().map(|url| (*url).to_owned()).collect(),
        location,
        status,
        property_type,
        total_units: rng.random_range(100..900),
        available_units: if funding {
            rng.random_range(50..450)
        } else {
            0
        },
        financial,
        timeline,
        amenities: select_subset(rng, AMENITIES, 4, 11)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        investors: rng.random_range(50..350),
        documents: documents(rng),
        updates: updates(rng, anchor),
    }
}

#[expect(clippy::float_arithmetic, reason = "coordinates are floating point")]
fn jitter(rng: &mut ChaCha8Rng) -> Coordinates {
    Coordinates {
        lat: BASE_COORDINATES.lat + rng.random_range(-COORDINATE_SPREAD..COORDINATE_SPREAD),
        lng: BASE_COORDINATES.lng + rng.random_range(-COORDINATE_SPREAD..COORDINATE_SPREAD),
    }
}

fn documents(rng: &mut ChaCha8Rng) -> Vec<ProjectDocument> {
    let document = |name: &str, verified: bool| ProjectDocument {
        name: name.to_owned(),
        verified,
    };
    vec![
        document("SEC Registration", true),
        document("Building Permit", true),
        document("Environmental Compliance", rng.random_ratio(9, 10)),
        document("Fire Safety Certificate", rng.random_ratio(4, 5)),
        document("Tax Declaration", true),
    ]
}

fn updates(rng: &mut ChaCha8Rng, anchor: DateTime<Utc>) -> Vec<ProjectUpdate> {
    vec![
        ProjectUpdate {
            date: days_before(rng, anchor, 30),
            title: "Construction Progress Update".to_owned(),
            content: "Latest construction milestones achieved ahead of schedule. Foundation \
                      work completed successfully."
                .to_owned(),
        },
        ProjectUpdate {
            date: days_before(rng, anchor, 60),
            title: "Permit Approval".to_owned(),
            content: "All necessary permits have been approved by local government authorities."
                .to_owned(),
        },
    ]
}
