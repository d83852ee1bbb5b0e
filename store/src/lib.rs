//! Client state store for the Rise fractional real-estate demo.
//!
//! The crate owns the in-memory application state the demo client works
//! against: the session, the entity collections generated by `rise-data`,
//! and the actions that mutate them. Derived views (portfolio, dashboards,
//! browse filters, quotes) are pure functions in [`domain::queries`].
//!
//! Side effects go through ports:
//!
//! - [`domain::ports::InvestmentGateway`] settles investments and is bounded
//!   by a timeout
//! - [`domain::ports::SnapshotRepository`] persists the state after every
//!   mutation
//!
//! [`outbound`] provides the simulated gateway and the JSON snapshot file,
//! and [`config`] loads their settings from the environment.

pub mod config;
pub mod domain;
pub mod outbound;
