//! Driven port for submitting investments to a payment backend.
//!
//! The store owns the request and receipt shapes so it can stay agnostic of
//! whether investments settle against a simulator or a real processor.

use async_trait::async_trait;

use super::define_port_error;

/// Investment order handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentRequest {
    /// Investing user.
    pub user_id: String,
    /// Target project.
    pub project_id: String,
    /// Amount in pesos.
    pub amount: u64,
}

/// Settlement confirmation returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentReceipt {
    /// Gateway-side reference for the settled payment.
    pub reference: String,
    /// Funding channel the payment settled through.
    pub payment_method: String,
}

define_port_error! {
    /// Errors surfaced while submitting an investment.
    pub enum InvestmentGatewayError {
        /// The gateway refused the payment.
        Rejected { reason: String } =>
            "investment rejected: {reason}",
        /// No response arrived within the configured timeout.
        Timeout { timeout_ms: u64 } =>
            "investment gateway timed out after {timeout_ms} ms",
        /// The gateway could not be reached.
        Unavailable { message: String } =>
            "investment gateway unavailable: {message}",
    }
}

impl InvestmentGatewayError {
    /// Return whether retrying the same request is expected to help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable { .. })
    }
}

/// Port for settling investment payments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvestmentGateway: Send + Sync {
    /// Submit one investment and wait for the settlement outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rise_store::domain::ports::{
    ///     FixtureInvestmentGateway, InvestmentGateway, InvestmentRequest,
    /// };
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
    /// let receipt = FixtureInvestmentGateway
    ///     .submit_investment(&InvestmentRequest {
    ///         user_id: "user_001".to_owned(),
    ///         project_id: "proj_001".to_owned(),
    ///         amount: 100_000,
    ///     })
    ///     .await?;
    /// assert_eq!(receipt.payment_method, "bank_transfer");
    /// # Ok::<(), rise_store::domain::ports::InvestmentGatewayError>(())
    /// # }).expect("fixture gateway settles");
    /// ```
    async fn submit_investment(
        &self,
        request: &InvestmentRequest,
    ) -> Result<InvestmentReceipt, InvestmentGatewayError>;
}

/// Fixture implementation that settles every request immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureInvestmentGateway;

#[async_trait]
impl InvestmentGateway for FixtureInvestmentGateway {
    async fn submit_investment(
        &self,
        request: &InvestmentRequest,
    ) -> Result<InvestmentReceipt, InvestmentGatewayError> {
        Ok(InvestmentReceipt {
            reference: format!("fixture-{}-{}", request.project_id, request.amount),
            payment_method: "bank_transfer".to_owned(),
        })
    }
}
