//! Domain ports and supporting types for the store's driven side.

mod macros;
pub(crate) use macros::define_port_error;

mod investment_gateway;
mod snapshot_repository;

#[cfg(test)]
pub use investment_gateway::MockInvestmentGateway;
pub use investment_gateway::{
    FixtureInvestmentGateway, InvestmentGateway, InvestmentGatewayError, InvestmentReceipt,
    InvestmentRequest,
};
#[cfg(test)]
pub use snapshot_repository::MockSnapshotRepository;
pub use snapshot_repository::{FixtureSnapshotRepository, SnapshotError, SnapshotRepository};
