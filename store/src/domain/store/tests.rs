//! Tests for the state store actions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rise_data::EntityCounts;
use rise_data::model::NotificationType;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::kyc::{KycDocuments, PersonalInfo};
use crate::domain::ports::{
    FixtureInvestmentGateway, MockInvestmentGateway, MockSnapshotRepository, SnapshotError,
};
use crate::domain::test_fixtures::{FixtureClock, day, notification, project, state_with, user};

fn tiny_seed() -> SeedDefinition {
    SeedDefinition::new("unit-seed", 11).with_counts(EntityCounts {
        users: 5,
        projects: 3,
        investments: 6,
        notifications: 4,
    })
}

fn store_with_gateway(gateway: Arc<dyn InvestmentGateway>) -> Store {
    Store::new(gateway, Arc::new(FixtureClock { utc_now: day(15) }), tiny_seed())
}

/// Store holding two projects, two notifications and a logged-in investor.
fn seeded_store(gateway: Arc<dyn InvestmentGateway>) -> Store {
    let mut store = store_with_gateway(gateway);
    store.state = state_with(|state| {
        state.users = vec![
            user("user_001", "Maria Santos", UserRole::Investor),
            user("dev_001", "Juan Cruz", UserRole::Developer),
        ];
        state.projects = vec![project("proj_001"), project("proj_002")];
        state.notifications = vec![
            notification("notif_001", "user_001", 3, false),
            notification("notif_002", "user_001", 4, false),
        ];
    });
    let maria = store.state.user("user_001").cloned().expect("seeded investor");
    store.login(maria).expect("login");
    store
}

#[fixture]
fn store() -> Store {
    seeded_store(Arc::new(FixtureInvestmentGateway))
}

fn receipt() -> InvestmentReceipt {
    InvestmentReceipt {
        reference: "ref-001".to_owned(),
        payment_method: "bank_transfer".to_owned(),
    }
}

fn complete_application() -> KycApplication {
    KycApplication {
        personal: PersonalInfo {
            first_name: "Maria".to_owned(),
            last_name: "Santos".to_owned(),
            birth_date: "1988-02-14".to_owned(),
            address: "5 Paseo de Roxas".to_owned(),
            city: "Makati".to_owned(),
            phone: "+639171234567".to_owned(),
            occupation: "Analyst".to_owned(),
            source_of_income: "Salary".to_owned(),
            ..PersonalInfo::default()
        },
        documents: KycDocuments {
            government_id: Some("id.jpg".to_owned()),
            proof_of_address: Some("bill.pdf".to_owned()),
            income_proof: Some("itr.pdf".to_owned()),
            selfie: Some("selfie.jpg".to_owned()),
        },
        terms_accepted: true,
        ..KycApplication::default()
    }
}

struct StalledGateway;

#[async_trait]
impl InvestmentGateway for StalledGateway {
    async fn submit_investment(
        &self,
        _request: &InvestmentRequest,
    ) -> Result<InvestmentReceipt, InvestmentGatewayError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(receipt())
    }
}

#[test]
fn initialize_data_generates_once() {
    let mut store = store_with_gateway(Arc::new(FixtureInvestmentGateway));

    assert!(store.initialize_data().expect("first initialisation"));
    let first = store.state().clone();
    assert!(!store.initialize_data().expect("second initialisation"));

    assert_eq!(first.users.len(), 8);
    assert_eq!(first.projects.len(), 3);
    assert_eq!(first.investments.len(), 6);
    assert_eq!(store.state(), &first);
}

#[rstest]
fn initialize_data_keeps_existing_projects(mut store: Store) {
    assert!(!store.initialize_data().expect("skip"));
    assert_eq!(store.state().projects.len(), 2);
    assert_eq!(store.state().users.len(), 2);
}

#[rstest]
fn login_adopts_role_and_logout_keeps_it(mut store: Store) {
    let juan = store.state().user("dev_001").cloned().expect("developer");

    store.login(juan).expect("login");
    assert_eq!(store.state().current_role, UserRole::Developer);
    assert!(store.state().is_authenticated);

    store.logout().expect("logout");
    assert!(store.state().current_user.is_none());
    assert!(!store.state().is_authenticated);
    assert_eq!(store.state().current_role, UserRole::Developer);
}

#[rstest]
fn switch_role_updates_session_copy_only(mut store: Store) {
    assert!(store.switch_role(UserRole::Admin).expect("switch"));

    let state = store.state();
    assert_eq!(state.current_role, UserRole::Admin);
    assert_eq!(
        state.current_user.as_ref().map(|user| user.role),
        Some(UserRole::Admin)
    );
    assert_eq!(
        state.user("user_001").map(|user| user.role),
        Some(UserRole::Investor)
    );
}

#[rstest]
fn switch_role_without_session_is_a_no_op(mut store: Store) {
    store.logout().expect("logout");
    let before = store.state().clone();

    assert!(!store.switch_role(UserRole::Admin).expect("switch"));
    assert_eq!(store.state(), &before);
}

#[tokio::test]
async fn invest_updates_project_and_appends_mirrored_entries() {
    let mut gateway = MockInvestmentGateway::new();
    gateway
        .expect_submit_investment()
        .withf(|request| {
            request.user_id == "user_001"
                && request.project_id == "proj_002"
                && request.amount == 100_000
        })
        .times(1)
        .returning(|_| Ok(receipt()));
    let mut store = seeded_store(Arc::new(gateway));
    let before = store.state().project("proj_002").cloned().expect("project");

    let outcome = store
        .invest_in_project("proj_002", 100_000)
        .await
        .expect("investment settles");

    let after = store.state().project("proj_002").expect("project");
    assert_eq!(
        after.financial.current_amount,
        before.financial.current_amount + 100_000
    );
    assert_eq!(after.investors, before.investors + 1);
    assert_eq!(store.state().investments, vec![outcome.investment.clone()]);
    assert_eq!(store.state().transactions, vec![outcome.transaction.clone()]);
    assert!(outcome.transaction.mirrors(&outcome.investment));
    assert_eq!(outcome.investment.status, InvestmentStatus::Active);
    assert!(outcome.investment.returns.is_empty());
    assert_eq!(outcome.investment.date, day(15));
    assert!((outcome.investment.shares - 0.001).abs() < 1e-12);
    assert_eq!(outcome.transaction.status, TransactionStatus::Completed);
    assert_eq!(
        outcome.transaction.payment_method.as_deref(),
        Some("bank_transfer")
    );
    assert!(outcome.transaction.bank_details.is_none());
    assert!(!store.state().is_loading);
}

#[tokio::test]
async fn rejected_investment_leaves_state_untouched() {
    let mut gateway = MockInvestmentGateway::new();
    gateway
        .expect_submit_investment()
        .times(1)
        .returning(|_| Err(InvestmentGatewayError::rejected("insufficient funds")));
    let mut store = seeded_store(Arc::new(gateway));
    let before = store.state().clone();

    let err = store
        .invest_in_project("proj_001", 50_000)
        .await
        .expect_err("gateway rejects");

    assert_eq!(
        err,
        StoreError::Gateway(InvestmentGatewayError::rejected("insufficient funds"))
    );
    assert_eq!(store.state(), &before);
    assert!(!store.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn stalled_gateway_times_out_without_changes() {
    let mut store =
        seeded_store(Arc::new(StalledGateway)).with_gateway_timeout(Duration::from_millis(250));
    let before = store.state().clone();

    let err = store
        .invest_in_project("proj_001", 50_000)
        .await
        .expect_err("gateway stalls");

    assert_eq!(
        err,
        StoreError::Gateway(InvestmentGatewayError::timeout(250_u64))
    );
    assert_eq!(store.state(), &before);
    assert!(!store.state().is_loading);
}

#[rstest]
#[case::logged_out(true, "proj_001", StoreError::NotAuthenticated)]
#[case::unknown_project(false, "proj_404", StoreError::ProjectNotFound { id: "proj_404".to_owned() })]
#[tokio::test]
async fn invest_preconditions_skip_the_gateway(
    #[case] log_out: bool,
    #[case] project_id: &str,
    #[case] expected: StoreError,
) {
    let mut gateway = MockInvestmentGateway::new();
    gateway.expect_submit_investment().never();
    let mut store = seeded_store(Arc::new(gateway));
    if log_out {
        store.logout().expect("logout");
    }

    let err = store
        .invest_in_project(project_id, 50_000)
        .await
        .expect_err("precondition fails");

    assert_eq!(err, expected);
}

#[rstest]
#[case(ProjectStatus::Funding, true)]
#[case(ProjectStatus::Funded, false)]
#[case(ProjectStatus::Construction, false)]
#[case(ProjectStatus::Completed, false)]
fn approve_sets_funded_unconditionally(
    mut store: Store,
    #[case] previous: ProjectStatus,
    #[case] lifecycle_valid: bool,
) {
    store
        .state
        .project_mut("proj_001")
        .expect("project")
        .status = previous;

    let report = store.approve_project("proj_001").expect("approve");

    assert_eq!(
        report,
        ApprovalReport {
            project_id: "proj_001".to_owned(),
            previous,
            lifecycle_valid,
        }
    );
    assert_eq!(
        store.state().project("proj_001").map(|p| p.status),
        Some(ProjectStatus::Funded)
    );
}

#[rstest]
fn advance_walks_the_lifecycle_then_stops(mut store: Store) {
    let stages: Vec<ProjectStatus> = (0..3)
        .map(|_| store.advance_project_status("proj_001").expect("advance"))
        .collect();

    assert_eq!(
        stages,
        vec![
            ProjectStatus::Funded,
            ProjectStatus::Construction,
            ProjectStatus::Completed,
        ]
    );
    assert_eq!(
        store.advance_project_status("proj_001"),
        Err(StoreError::LifecycleFinished {
            id: "proj_001".to_owned()
        })
    );
}

#[rstest]
fn transition_rejects_skipped_stages(mut store: Store) {
    let err = store
        .transition_project("proj_001", ProjectStatus::Construction)
        .expect_err("funding cannot skip to construction");

    assert_eq!(
        err,
        StoreError::InvalidTransition {
            id: "proj_001".to_owned(),
            from: ProjectStatus::Funding,
            to: ProjectStatus::Construction,
        }
    );
    assert_eq!(
        store.state().project("proj_001").map(|p| p.status),
        Some(ProjectStatus::Funding)
    );

    store
        .transition_project("proj_001", ProjectStatus::Funded)
        .expect("single step");
    assert_eq!(
        store.state().project("proj_001").map(|p| p.status),
        Some(ProjectStatus::Funded)
    );
}

#[rstest]
fn mark_read_touches_exactly_one_notification(mut store: Store) {
    store
        .mark_notification_as_read("notif_002")
        .expect("mark read");

    let read: Vec<(&str, bool)> = store
        .state()
        .notifications
        .iter()
        .map(|n| (n.id.as_str(), n.read))
        .collect();
    assert_eq!(read, vec![("notif_001", false), ("notif_002", true)]);
    assert_eq!(
        store.mark_notification_as_read("notif_404"),
        Err(StoreError::NotificationNotFound {
            id: "notif_404".to_owned()
        })
    );
}

#[rstest]
fn add_notification_prepends_with_clock_time(mut store: Store) {
    let id = store
        .add_notification(NotificationDraft {
            user_id: "user_001".to_owned(),
            kind: NotificationType::FundingMilestone,
            title: "Funding Milestone Reached".to_owned(),
            message: "Tower proj_001 reached 80% funding!".to_owned(),
            read: false,
            action_url: None,
        })
        .expect("add");

    let first = store.state().notifications.first().expect("notification");
    assert_eq!(first.id, id);
    assert!(id.starts_with("notif_"));
    assert_eq!(first.timestamp, day(15));
    assert_eq!(store.state().notifications.len(), 3);
}

#[rstest]
fn create_project_appends_with_fresh_id(mut store: Store) {
    let template = project("unused");
    let draft = ProjectDraft {
        title: "Bonifacio Heights".to_owned(),
        developer: "Juan Cruz".to_owned(),
        description: template.description,
        images: Vec::new(),
        location: template.location,
        status: ProjectStatus::Funding,
        property_type: template.property_type,
        total_units: 120,
        available_units: 120,
        financial: template.financial,
        timeline: template.timeline,
        amenities: vec!["Pool".to_owned()],
        investors: 0,
        documents: Vec::new(),
        updates: Vec::new(),
    };

    let first = store.create_project(draft.clone()).expect("create");
    let second = store.create_project(draft).expect("create again");

    assert_ne!(first, second);
    assert!(first.starts_with("proj_"));
    let last = store.state().projects.last().expect("project");
    assert_eq!(last.id, second);
    assert_eq!(last.title, "Bonifacio Heights");
    assert_eq!(store.state().projects.len(), 4);
}

#[rstest]
fn submit_kyc_marks_session_and_record_pending(mut store: Store) {
    store
        .state
        .current_user
        .as_mut()
        .expect("session")
        .kyc_status = KycStatus::Rejected;

    store
        .submit_kyc(&complete_application())
        .expect("application accepted");

    let state = store.state();
    let session = state.current_user.as_ref().expect("session");
    assert_eq!(session.kyc_status, KycStatus::Pending);
    assert!(session.verification_date.is_none());
    assert_eq!(
        state.user("user_001").map(|user| user.kyc_status),
        Some(KycStatus::Pending)
    );
}

#[rstest]
fn submit_kyc_refuses_verified_accounts(mut store: Store) {
    assert_eq!(
        store.submit_kyc(&complete_application()),
        Err(StoreError::Kyc(KycError::AlreadyVerified {
            user_id: "user_001".to_owned()
        }))
    );
}

#[rstest]
fn submit_kyc_reports_missing_fields(mut store: Store) {
    store
        .state
        .current_user
        .as_mut()
        .expect("session")
        .kyc_status = KycStatus::Pending;
    let mut application = complete_application();
    application.documents.selfie = None;

    let err = store.submit_kyc(&application).expect_err("incomplete");

    assert!(matches!(
        err,
        StoreError::Kyc(KycError::MissingFields { ref fields, .. }) if fields == &["selfie"]
    ));
}

#[test]
fn snapshots_are_restored_and_saved_after_mutations() {
    let restored = state_with(|state| {
        state.projects = vec![project("proj_001")];
        state.notifications = vec![notification("notif_001", "user_001", 2, false)];
    });
    let mut snapshots = MockSnapshotRepository::new();
    let loaded = restored.clone();
    snapshots
        .expect_load()
        .times(1)
        .return_once(move || Ok(Some(loaded)));
    snapshots
        .expect_save()
        .withf(|state| state.notifications.iter().all(|n| n.read))
        .times(1)
        .returning(|_| Ok(()));

    let mut store = store_with_gateway(Arc::new(FixtureInvestmentGateway))
        .with_snapshots(Arc::new(snapshots))
        .expect("restore");
    assert_eq!(store.state(), &restored);

    store.set_loading(true);
    store
        .mark_notification_as_read("notif_001")
        .expect("mark read");
}

#[test]
fn snapshot_write_failures_surface_after_applying() {
    let mut snapshots = MockSnapshotRepository::new();
    snapshots.expect_load().return_once(|| Ok(None));
    snapshots
        .expect_save()
        .returning(|_| Err(SnapshotError::write("disk full")));
    let mut store = store_with_gateway(Arc::new(FixtureInvestmentGateway))
        .with_snapshots(Arc::new(snapshots))
        .expect("attach");

    let maria = user("user_001", "Maria Santos", UserRole::Investor);
    let err = store.login(maria).expect_err("save fails");

    assert_eq!(err, StoreError::Snapshot(SnapshotError::write("disk full")));
    assert!(store.state().is_authenticated);
}
