//! Demo accounts and randomized platform users.

use chrono::{DateTime, NaiveDate, Utc};
use fake::Fake;
use fake::faker::internet::raw::FreeEmailProvider;
use fake::locales::EN;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::pools::{FIRST_NAMES, INVESTOR_BADGES, LAST_NAMES, city_names};
use super::{days_before, pick, select_subset, sequential_id};
use crate::model::{
    KycStatus, PropertyType, RiskProfile, User, UserPreferences, UserRole, UserStats,
};

/// Identifier of the first randomized user; lower numbers are reserved.
const FIRST_GENERATED_USER: usize = 4;

/// Generates the three demo accounts followed by `count` random users.
pub(super) fn generate_users(
    rng: &mut ChaCha8Rng,
    count: usize,
    anchor: DateTime<Utc>,
) -> Vec<User> {
    let mut users = demo_users();
    users.reserve(count);
    for index in FIRST_GENERATED_USER..FIRST_GENERATED_USER + count {
        users.push(random_user(rng, index, anchor));
    }
    users
}

/// The fixed investor, developer and admin accounts used for demo logins.
fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "user_001".to_owned(),
            name: "Maria Santos".to_owned(),
            email: "maria.santos@gmail.com".to_owned(),
            phone: "+639171234567".to_owned(),
            avatar: avatar_url(1),
            role: UserRole::Investor,
            kyc_status: KycStatus::Verified,
            verification_date: calendar_date(2023, 6, 15),
            stats: UserStats {
                total_invested: 2_500_000,
                active_investments: 8,
                total_returns: 425_000,
                portfolio_value: 2_925_000,
            },
            investment_history: Vec::new(),
            preferences: UserPreferences {
                property_types: vec![PropertyType::ResidentialCondo, PropertyType::Commercial],
                locations: owned(&["Makati", "BGC", "Ortigas"]),
                risk_profile: RiskProfile::Moderate,
            },
            badges: owned(&["Early Investor", "Verified KYC", "Top 10%"]),
        },
        User {
            id: "dev_001".to_owned(),
            name: "Juan Cruz".to_owned(),
            email: "juan.cruz@ayalaland.com".to_owned(),
            phone: "+639281234567".to_owned(),
            avatar: avatar_url(2),
            role: UserRole::Developer,
            kyc_status: KycStatus::Verified,
            verification_date: calendar_date(2023, 1, 10),
            stats: UserStats {
                total_invested: 0,
                active_investments: 0,
                total_returns: 15_800_000,
                portfolio_value: 0,
            },
            investment_history: Vec::new(),
            preferences: UserPreferences {
                property_types: vec![PropertyType::ResidentialCondo, PropertyType::MixedUse],
                locations: owned(&["Makati", "BGC"]),
                risk_profile: RiskProfile::Moderate,
            },
            badges: owned(&["Verified Developer", "Premium Partner", "5-Star Rating"]),
        },
        User {
            id: "admin_001".to_owned(),
            name: "Elena Rodriguez".to_owned(),
            email: "elena.rodriguez@rise.ph".to_owned(),
            phone: "+639391234567".to_owned(),
            avatar: avatar_url(3),
            role: UserRole::Admin,
            kyc_status: KycStatus::Verified,
            verification_date: calendar_date(2022, 12, 1),
            stats: UserStats::default(),
            investment_history: Vec::new(),
            preferences: UserPreferences {
                property_types: PropertyType::ALL.to_vec(),
                locations: owned(&["Makati", "BGC", "Ortigas", "Quezon City"]),
                risk_profile: RiskProfile::Moderate,
            },
            badges: owned(&["Platform Admin", "Verified", "Executive"]),
        },
    ]
}

fn random_user(rng: &mut ChaCha8Rng, index: usize, anchor: DateTime<Utc>) -> User {
    let name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
    let domain: String = FreeEmailProvider(EN).fake_with_rng(rng);
    let email = format!("{}@{domain}", name.to_lowercase().replacen(' ', ".", 1));
    let phone = format!("+639{:09}", rng.random_range(0..1_000_000_000_u32));

    // Roughly one in five generated accounts is a developer.
    let role = if rng.random_ratio(1, 5) {
        UserRole::Developer
    } else {
        UserRole::Investor
    };
    let kyc_status = if rng.random_ratio(9, 10) {
        KycStatus::Verified
    } else {
        KycStatus::Pending
    };
    // Drawn independently of the KYC status.
    let verification_date = rng
        .random_ratio(9, 10)
        .then(|| days_before(rng, anchor, 365));

    let stats = UserStats {
        total_invested: rng.random_range(100_000..5_100_000),
        active_investments: rng.random_range(1..16),
        total_returns: rng.random_range(10_000..1_010_000),
        portfolio_value: rng.random_range(110_000..6_110_000),
    };
    let preferences = UserPreferences {
        property_types: select_subset(rng, PropertyType::ALL, 1, 3),
        locations: select_subset(rng, &city_names(), 1, 4)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        risk_profile: pick(rng, RiskProfile::ALL),
    };
    let badges = select_subset(rng, INVESTOR_BADGES, 0, 2)
        .into_iter()
        .map(str::to_owned)
        .collect();

    User {
        id: sequential_id("user", index),
        name,
        email,
        phone,
        avatar: avatar_url(index),
        role,
        kyc_status,
        verification_date,
        stats,
        investment_history: Vec::new(),
        preferences,
        badges,
    }
}

fn avatar_url(index: usize) -> String {
    format!("https://i.pravatar.cc/150?img={index}")
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
