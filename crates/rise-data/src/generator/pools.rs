//! Fixed vocabularies the generator draws from.

pub(super) const FIRST_NAMES: &[&str] = &[
    "Juan", "Maria", "Jose", "Ana", "Pedro", "Rosa", "Carlos", "Elena", "Miguel", "Carmen",
    "Rafael", "Isabel", "Antonio", "Luz", "Fernando", "Grace", "Ricardo", "Diana", "Eduardo",
    "Sofia",
];

pub(super) const LAST_NAMES: &[&str] = &[
    "Santos",
    "Reyes",
    "Cruz",
    "Garcia",
    "Mendoza",
    "Torres",
    "Flores",
    "Rivera",
    "Gonzales",
    "Rodriguez",
    "Martinez",
    "Lopez",
    "Hernandez",
    "Perez",
    "Sanchez",
    "Ramirez",
    "Castillo",
    "Morales",
    "Aquino",
    "Dela Cruz",
];

/// Regions and the cities listed under each.
pub(super) const REGIONS: &[(&str, &[&str])] = &[
    (
        "Metro Manila",
        &[
            "Makati",
            "BGC",
            "Ortigas",
            "Quezon City",
            "Manila",
            "Pasig",
            "Mandaluyong",
            "San Juan",
        ],
    ),
    (
        "Cebu",
        &[
            "IT Park",
            "Business Park",
            "SRP",
            "Lahug",
            "Banilad",
            "Ayala Center",
        ],
    ),
    (
        "Davao",
        &["Ecoland", "Lanang", "Bajada", "Matina", "Toril", "Downtown"],
    ),
];

pub(super) const DEVELOPERS: &[&str] = &[
    "Ayala Land Premier",
    "SM Development Corporation",
    "Megaworld Corporation",
    "Robinsons Land Corporation",
    "DMCI Homes",
    "Century Properties",
    "Alveo Land",
    "Shang Properties",
];

pub(super) const PROPERTY_NAMES: &[&str] = &[
    "Skyline Tower",
    "Fort Victoria",
    "The Parkside",
    "Metro Heights",
    "City Garden",
    "The Residence",
    "Plaza Tower",
    "Grand Central",
    "Vista Verde",
    "Royal Palm",
    "Golden Gate",
    "Marina Bay",
    "Crown Plaza",
    "Diamond Tower",
    "Emerald Square",
];

pub(super) const AMENITIES: &[&str] = &[
    "Infinity Pool",
    "Sky Gym",
    "Co-working Spaces",
    "Retail Podium",
    "Helipad",
    "Concierge Service",
    "Clubhouse",
    "Basketball Court",
    "Tennis Court",
    "Jogging Path",
    "Kids Playground",
    "Function Hall",
    "Business Center",
    "Spa",
    "Sauna",
    "Steam Room",
    "Game Room",
    "Library",
    "Outdoor BBQ Area",
];

pub(super) const STREETS: &[&str] = &["Main", "Central", "Business", "Corporate", "Premium"];

pub(super) const PROJECT_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1494526585095-c41746248156?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1582268611958-ebfd161ef9cf?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1571208077326-f26d2c4d7080?w=800&h=600&fit=crop",
];

pub(super) const INVESTOR_BADGES: &[&str] = &[
    "Early Investor",
    "Verified KYC",
    "Top 10%",
    "Loyalty Member",
    "Beta Tester",
];

pub(super) const PAYMENT_METHODS: &[&str] = &["bank_transfer", "gcash", "paymaya"];

pub(super) const BANKS: &[&str] = &["BDO", "BPI", "Metrobank", "Security Bank"];

/// Every city paired with its region, in declaration order.
pub(super) fn all_cities() -> Vec<(&'static str, &'static str)> {
    REGIONS
        .iter()
        .flat_map(|(region, cities)| cities.iter().map(move |city| (*region, *city)))
        .collect()
}

/// Every city name, in declaration order.
pub(super) fn city_names() -> Vec<&'static str> {
    all_cities().into_iter().map(|(_, city)| city).collect()
}
