//! Behavioural tests for the rise-data crate.
//!
//! These tests validate the crate's behaviour against Gherkin scenarios
//! covering registry parsing, deterministic generation and dataset integrity.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use chrono::{DateTime, TimeZone, Utc};
use rise_data::model::UserRole;
use rise_data::{
    Dataset, RegistryError, SHARES_TOLERANCE, SeedDefinition, SeedRegistry, generate_dataset,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Test fixtures and constants
// ============================================================================

/// Base valid registry JSON used by multiple Given steps.
const VALID_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "seeds": [
        {"name": "test-seed", "seed": 42, "userCount": 8, "projectCount": 5,
         "investmentCount": 20, "notificationCount": 15},
        {"name": "tiny-seed", "seed": 7, "userCount": 2, "projectCount": 1,
         "investmentCount": 2, "notificationCount": 1}
    ]
}"#;

/// Test world holding the parsed registry and generated datasets.
#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    registry_result: Slot<Result<SeedRegistry, RegistryError>>,
    seed_def: Slot<SeedDefinition>,
    lookup_error: Slot<RegistryError>,
    dataset: Slot<Dataset>,
    second_dataset: Slot<Dataset>,
}

impl World {
    fn registry(&self) -> SeedRegistry {
        self.registry_result
            .get()
            .expect("registry should be set")
            .expect("registry should be valid")
    }

    fn registry_result(&self) -> Result<SeedRegistry, RegistryError> {
        self.registry_result
            .get()
            .expect("registry result should be set")
    }

    fn dataset(&self) -> Dataset {
        self.dataset.get().expect("dataset should be generated")
    }
}

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid anchor")
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a valid seed registry JSON")]
fn a_valid_seed_registry_json(world: &World) {
    world.json_input.set(VALID_REGISTRY_JSON.to_owned());
}

#[given("a valid seed registry")]
fn a_valid_seed_registry(world: &World) {
    let registry = SeedRegistry::from_json(VALID_REGISTRY_JSON).expect("valid test registry");
    world.registry_result.set(Ok(registry));
}

#[given("the seed profile \"{name}\"")]
fn the_seed_profile(world: &World, name: String) {
    let registry = world.registry();
    let seed_def = registry.find_seed(&name).expect("seed exists");
    world.seed_def.set(seed_def.clone());
}

#[given("malformed JSON")]
fn malformed_json(world: &World) {
    world.json_input.set("not valid json".to_owned());
}

#[given("registry JSON with empty seeds array")]
fn registry_json_with_empty_seeds_array(world: &World) {
    world
        .json_input
        .set(r#"{"version": 1, "seeds": []}"#.to_owned());
}

// ============================================================================
// When steps
// ============================================================================

#[when("the registry is parsed")]
fn the_registry_is_parsed(world: &World) {
    let json = world.json_input.get().expect("JSON input should be set");
    world.registry_result.set(SeedRegistry::from_json(&json));
}

#[when("the dataset is generated")]
fn the_dataset_is_generated(world: &World) {
    let seed_def = world.seed_def.get().expect("seed definition should be set");
    let dataset = generate_dataset(&seed_def, anchor()).expect("generation succeeds");
    world.dataset.set(dataset);
}

#[when("the dataset is generated twice")]
fn the_dataset_is_generated_twice(world: &World) {
    let seed_def = world.seed_def.get().expect("seed definition should be set");
    let first = generate_dataset(&seed_def, anchor()).expect("first generation");
    let second = generate_dataset(&seed_def, anchor()).expect("second generation");
    world.dataset.set(first);
    world.second_dataset.set(second);
}

#[when("the seed profile \"{name}\" is looked up")]
fn the_seed_profile_is_looked_up(world: &World, name: String) {
    let registry = world.registry();
    let err = registry.find_seed(&name).expect_err("lookup should fail");
    world.lookup_error.set(err);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("parsing succeeds")]
fn parsing_succeeds(world: &World) {
    let result = world.registry_result();
    assert!(result.is_ok(), "Expected parsing to succeed: {result:?}");
}

#[then("the registry contains the expected seed profiles")]
fn the_registry_contains_the_expected_seed_profiles(world: &World) {
    let registry = world.registry();
    assert_eq!(registry.seeds().len(), 2);
    let seed = registry.find_seed("test-seed").expect("seed should exist");
    assert_eq!(seed.seed(), 42);
    assert_eq!(seed.counts().projects, 5);
}

#[then("both generations are identical")]
fn both_generations_are_identical(world: &World) {
    let first = world.dataset();
    let second = world
        .second_dataset
        .get()
        .expect("second generation should be set");

    assert_eq!(first, second, "Generations should be deterministic");
}

#[then("every investment share matches its project target")]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "shares are fractional by definition"
)]
fn every_investment_share_matches_its_project_target(world: &World) {
    let dataset = world.dataset();
    for investment in &dataset.investments {
        let project = dataset
            .project(&investment.project_id)
            .expect("project exists");
        let expected = investment.amount as f64 / project.financial.target_amount as f64;
        assert!(
            (investment.shares - expected).abs() <= SHARES_TOLERANCE,
            "shares drifted for {}",
            investment.id
        );
    }
}

#[then("every transaction mirrors an investment")]
fn every_transaction_mirrors_an_investment(world: &World) {
    let dataset = world.dataset();
    for transaction in &dataset.transactions {
        assert!(
            dataset
                .investments
                .iter()
                .any(|investment| transaction.mirrors(investment)),
            "no investment mirrors {}",
            transaction.id
        );
    }
}

#[then("the dataset has {count:usize} users")]
fn the_dataset_has_users(world: &World, count: usize) {
    assert_eq!(world.dataset().users.len(), count);
}

#[then("the demo accounts for every role are present")]
fn the_demo_accounts_for_every_role_are_present(world: &World) {
    let dataset = world.dataset();
    for (id, role) in [
        ("user_001", UserRole::Investor),
        ("dev_001", UserRole::Developer),
        ("admin_001", UserRole::Admin),
    ] {
        let user = dataset.user(id).expect("demo account exists");
        assert_eq!(user.role, role);
    }
}

#[then("parsing fails with a parse error")]
fn parsing_fails_with_a_parse_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[then("parsing fails with empty seeds error")]
fn parsing_fails_with_empty_seeds_error(world: &World) {
    match world.registry_result() {
        Err(RegistryError::EmptySeeds) => {}
        other => panic!("Expected EmptySeeds, got: {other:?}"),
    }
}

#[then("the lookup fails with seed not found")]
fn the_lookup_fails_with_seed_not_found(world: &World) {
    let err = world.lookup_error.get().expect("lookup error should be set");
    assert_eq!(
        err,
        RegistryError::SeedNotFound {
            name: "missing".to_owned()
        }
    );
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Valid registry parses successfully"
)]
fn valid_registry_parses_successfully(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Deterministic generation produces identical datasets"
)]
fn deterministic_generation_produces_identical_datasets(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Generated shares match project targets"
)]
fn generated_shares_match_project_targets(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Demo accounts are always present"
)]
fn demo_accounts_are_always_present(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Invalid JSON fails parsing"
)]
fn invalid_json_fails_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Empty seeds array fails parsing"
)]
fn empty_seeds_array_fails_parsing(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dataset.feature",
    name = "Unknown seed profile is reported"
)]
fn unknown_seed_profile_is_reported(world: World) {
    let _ = world;
}
