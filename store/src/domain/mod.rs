//! Store domain: state, actions, derived views and driven ports.

mod error;
mod kyc;
pub mod ports;
pub mod queries;
mod state;
mod store;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::StoreError;
pub use kyc::{KycApplication, KycDocuments, KycError, KycStep, PersonalInfo};
pub use state::AppState;
pub use store::{
    ApprovalReport, DEFAULT_GATEWAY_TIMEOUT, InvestmentOutcome, NotificationDraft, ProjectDraft,
    Store,
};
