//! The state store: one controller owning [`AppState`] and its actions.
//!
//! Every action that changes persisted fields writes a snapshot through the
//! configured [`SnapshotRepository`] before returning. Investment settlement
//! goes through an [`InvestmentGateway`] bounded by a timeout, and failures
//! leave the state untouched.

mod drafts;

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use rise_data::model::{
    Investment, InvestmentStatus, KycStatus, Project, ProjectStatus, Transaction, TransactionStatus,
    TransactionType, User, UserRole,
};
use rise_data::{SeedDefinition, generate_dataset, shares_for};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::{
    InvestmentGateway, InvestmentGatewayError, InvestmentReceipt, InvestmentRequest,
    SnapshotRepository,
};
use super::{AppState, KycApplication, KycError, StoreError};

pub use drafts::{NotificationDraft, ProjectDraft};

/// Time allowed for the gateway to settle an investment.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of a settled investment.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentOutcome {
    /// The position that was opened.
    pub investment: Investment,
    /// The ledger entry recording the payment.
    pub transaction: Transaction,
    /// Gateway confirmation.
    pub receipt: InvestmentReceipt,
}

/// What an approval changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalReport {
    /// Approved project.
    pub project_id: String,
    /// Status before approval.
    pub previous: ProjectStatus,
    /// Whether `previous → funded` is a lifecycle step.
    pub lifecycle_valid: bool,
}

/// Single owner of application state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use rise_data::SeedDefinition;
/// use rise_store::domain::Store;
/// use rise_store::domain::ports::FixtureInvestmentGateway;
///
/// let mut store = Store::new(
///     Arc::new(FixtureInvestmentGateway),
///     Arc::new(DefaultClock),
///     SeedDefinition::new("doc-seed", 7),
/// );
/// assert!(store.initialize_data().expect("dataset generated"));
/// assert!(!store.initialize_data().expect("already initialised"));
/// assert_eq!(store.state().projects.len(), 25);
/// ```
pub struct Store {
    state: AppState,
    gateway: Arc<dyn InvestmentGateway>,
    clock: Arc<dyn Clock>,
    snapshots: Option<Arc<dyn SnapshotRepository>>,
    seed: SeedDefinition,
    gateway_timeout: Duration,
}

impl Store {
    /// Creates a store with empty state and no persistence.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn InvestmentGateway>,
        clock: Arc<dyn Clock>,
        seed: SeedDefinition,
    ) -> Self {
        Self {
            state: AppState::default(),
            gateway,
            clock,
            snapshots: None,
            seed,
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }

    /// Replaces the gateway timeout.
    #[must_use]
    pub const fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    /// Attaches snapshot persistence and restores any saved state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the saved snapshot cannot be
    /// read or is not a supported document.
    pub fn with_snapshots(
        mut self,
        snapshots: Arc<dyn SnapshotRepository>,
    ) -> Result<Self, StoreError> {
        if let Some(state) = snapshots.load()? {
            info!(
                projects = state.projects.len(),
                users = state.users.len(),
                authenticated = state.is_authenticated,
                "restored state snapshot"
            );
            self.state = state;
        }
        self.snapshots = Some(snapshots);
        Ok(self)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Starts a session for `user`, adopting the user's role.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn login(&mut self, user: User) -> Result<(), StoreError> {
        info!(user_id = %user.id, role = %user.role, "user logged in");
        self.state.current_role = user.role;
        self.state.current_user = Some(user);
        self.state.is_authenticated = true;
        self.persist()
    }

    /// Ends the session. The session role is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(user) = self.state.current_user.take() {
            info!(user_id = %user.id, "user logged out");
        }
        self.state.is_authenticated = false;
        self.persist()
    }

    /// Switches the session role and the role on the session's user copy.
    ///
    /// Returns `false` without changing anything when nobody is logged in.
    /// The user record in the `users` collection is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn switch_role(&mut self, role: UserRole) -> Result<bool, StoreError> {
        let Some(user) = self.state.current_user.as_mut() else {
            debug!(%role, "role switch skipped: no session");
            return Ok(false);
        };
        user.role = role;
        info!(user_id = %user.id, %role, "session role switched");
        self.state.current_role = role;
        self.persist()?;
        Ok(true)
    }

    /// Sets the in-flight flag. Not persisted.
    pub const fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
    }

    /// Lists a new project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<String, StoreError> {
        let id = allocate_id("proj");
        info!(project_id = %id, developer = %draft.developer, "project created");
        self.state.projects.push(draft.into_project(id.clone()));
        self.persist()?;
        Ok(id)
    }

    /// Invests `amount` pesos in a project on behalf of the session user.
    ///
    /// The loading flag is raised while the gateway settles. On success the
    /// project's raised amount grows by `amount` and its investor count by
    /// one, and a matching investment and completed transaction are
    /// appended. Minimum tickets and remaining capacity are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] without a session,
    /// [`StoreError::ProjectNotFound`] for unknown projects and
    /// [`StoreError::Gateway`] when settlement fails or times out. None of
    /// these change the state.
    pub async fn invest_in_project(
        &mut self,
        project_id: &str,
        amount: u64,
    ) -> Result<InvestmentOutcome, StoreError> {
        let user_id = self
            .state
            .current_user
            .as_ref()
            .map(|user| user.id.clone())
            .ok_or(StoreError::NotAuthenticated)?;
        if self.state.project(project_id).is_none() {
            return Err(StoreError::ProjectNotFound {
                id: project_id.to_owned(),
            });
        }

        let request = InvestmentRequest {
            user_id,
            project_id: project_id.to_owned(),
            amount,
        };
        self.set_loading(true);
        let settled = self.settle(&request).await;
        self.set_loading(false);

        let receipt = settled.inspect_err(|err| {
            warn!(
                project_id,
                amount,
                error = %err,
                retryable = err.is_retryable(),
                "investment not settled"
            );
        })?;
        let outcome = self.record_investment(request, receipt)?;
        self.persist()?;
        Ok(outcome)
    }

    async fn settle(
        &self,
        request: &InvestmentRequest,
    ) -> Result<InvestmentReceipt, InvestmentGatewayError> {
        let gateway = Arc::clone(&self.gateway);
        match tokio::time::timeout(self.gateway_timeout, gateway.submit_investment(request)).await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(InvestmentGatewayError::timeout(
                u64::try_from(self.gateway_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    fn record_investment(
        &mut self,
        request: InvestmentRequest,
        receipt: InvestmentReceipt,
    ) -> Result<InvestmentOutcome, StoreError> {
        let InvestmentRequest {
            user_id,
            project_id,
            amount,
        } = request;
        let now = self.clock.utc();
        let project = self
            .state
            .project_mut(&project_id)
            .ok_or_else(|| StoreError::ProjectNotFound {
                id: project_id.clone(),
            })?;
        project.financial.current_amount = project.financial.current_amount.saturating_add(amount);
        project.investors = project.investors.saturating_add(1);
        let shares = shares_for(amount, project);

        let investment = Investment {
            id: allocate_id("inv"),
            user_id: user_id.clone(),
            project_id: project_id.clone(),
            amount,
            shares,
            date: now,
            status: InvestmentStatus::Active,
            returns: Vec::new(),
        };
        let transaction = Transaction {
            id: allocate_id("txn"),
            user_id,
            project_id: Some(project_id),
            kind: TransactionType::Investment,
            amount,
            timestamp: now,
            status: TransactionStatus::Completed,
            payment_method: Some(receipt.payment_method.clone()),
            bank_details: None,
        };
        info!(
            investment_id = %investment.id,
            project_id = %investment.project_id,
            user_id = %investment.user_id,
            amount,
            reference = %receipt.reference,
            "investment recorded"
        );
        self.state.investments.push(investment.clone());
        self.state.transactions.push(transaction.clone());
        Ok(InvestmentOutcome {
            investment,
            transaction,
            receipt,
        })
    }

    /// Marks a project funded regardless of its current status.
    ///
    /// The report says whether this was a single lifecycle step; a warning
    /// is logged when it was not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] for unknown projects and
    /// [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn approve_project(&mut self, project_id: &str) -> Result<ApprovalReport, StoreError> {
        let project = self.project_mut(project_id)?;
        let previous = project.status;
        project.status = ProjectStatus::Funded;
        let lifecycle_valid = previous.can_transition_to(ProjectStatus::Funded);
        if lifecycle_valid {
            info!(project_id, "project approved");
        } else {
            warn!(
                project_id,
                %previous,
                "project approved outside the funding stage"
            );
        }
        self.persist()?;
        Ok(ApprovalReport {
            project_id: project_id.to_owned(),
            previous,
            lifecycle_valid,
        })
    }

    /// Moves a project one stage along its lifecycle and returns the new
    /// stage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LifecycleFinished`] for completed projects,
    /// [`StoreError::ProjectNotFound`] for unknown ones and
    /// [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn advance_project_status(&mut self, project_id: &str) -> Result<ProjectStatus, StoreError> {
        let project = self.project_mut(project_id)?;
        let Some(next) = project.status.next() else {
            warn!(project_id, "advance rejected: project already completed");
            return Err(StoreError::LifecycleFinished {
                id: project_id.to_owned(),
            });
        };
        let previous = project.status;
        project.status = next;
        info!(project_id, %previous, status = %next, "project advanced");
        self.persist()?;
        Ok(next)
    }

    /// Moves a project to `target` when the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTransition`] when `target` is not the
    /// next stage, [`StoreError::ProjectNotFound`] for unknown projects and
    /// [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn transition_project(
        &mut self,
        project_id: &str,
        target: ProjectStatus,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let from = project.status;
        if !from.can_transition_to(target) {
            warn!(project_id, %from, to = %target, "transition rejected");
            return Err(StoreError::InvalidTransition {
                id: project_id.to_owned(),
                from,
                to: target,
            });
        }
        project.status = target;
        info!(project_id, %from, to = %target, "project transitioned");
        self.persist()
    }

    /// Marks one notification read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotificationNotFound`] for unknown ids and
    /// [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn mark_notification_as_read(&mut self, notification_id: &str) -> Result<(), StoreError> {
        let notification = self
            .state
            .notifications
            .iter_mut()
            .find(|notification| notification.id == notification_id)
            .ok_or_else(|| StoreError::NotificationNotFound {
                id: notification_id.to_owned(),
            })?;
        notification.read = true;
        debug!(notification_id, "notification marked read");
        self.persist()
    }

    /// Adds a notification at the front of the list and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Snapshot`] when the change cannot be persisted.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Result<String, StoreError> {
        let id = allocate_id("notif");
        let notification = draft.into_notification(id.clone(), self.clock.utc());
        info!(
            notification_id = %id,
            user_id = %notification.user_id,
            kind = %notification.kind,
            "notification added"
        );
        self.state.notifications.insert(0, notification);
        self.persist()?;
        Ok(id)
    }

    /// Generates the demo dataset unless projects already exist.
    ///
    /// Returns whether data was generated. Session fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Generation`] when the generator fails and
    /// [`StoreError::Snapshot`] when the result cannot be persisted.
    pub fn initialize_data(&mut self) -> Result<bool, StoreError> {
        if !self.state.projects.is_empty() {
            debug!(
                projects = self.state.projects.len(),
                "demo data already present; initialisation skipped"
            );
            return Ok(false);
        }
        let dataset = generate_dataset(&self.seed, self.clock.utc())?;
        info!(
            seed_name = %self.seed.name(),
            seed = self.seed.seed(),
            users = dataset.users.len(),
            projects = dataset.projects.len(),
            investments = dataset.investments.len(),
            transactions = dataset.transactions.len(),
            notifications = dataset.notifications.len(),
            "demo dataset generated"
        );
        self.state.load_dataset(dataset);
        self.persist()?;
        Ok(true)
    }

    /// Submits a KYC application for the session user, moving their
    /// verification status to pending.
    ///
    /// Both the session copy and the matching `users` record are updated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] without a session,
    /// [`StoreError::Kyc`] when the user is already verified or the
    /// application is incomplete, and [`StoreError::Snapshot`] when the
    /// change cannot be persisted.
    pub fn submit_kyc(&mut self, application: &KycApplication) -> Result<(), StoreError> {
        let user = self
            .state
            .current_user
            .as_mut()
            .ok_or(StoreError::NotAuthenticated)?;
        if user.kyc_status == KycStatus::Verified {
            return Err(KycError::AlreadyVerified {
                user_id: user.id.clone(),
            }
            .into());
        }
        application.ensure_submittable()?;

        mark_pending(user);
        let user_id = user.id.clone();
        if let Some(record) = self.state.users.iter_mut().find(|u| u.id == user_id) {
            mark_pending(record);
        }
        info!(user_id = %user_id, "kyc application submitted");
        self.persist()
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project, StoreError> {
        self.state
            .project_mut(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound {
                id: project_id.to_owned(),
            })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(snapshots) = &self.snapshots else {
            return Ok(());
        };
        snapshots.save(&self.state).map_err(|err| {
            warn!(error = %err, "failed to persist state snapshot");
            StoreError::from(err)
        })
    }
}

fn mark_pending(user: &mut User) {
    user.kyc_status = KycStatus::Pending;
    user.verification_date = None;
}

fn allocate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests;
