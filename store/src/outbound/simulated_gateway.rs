//! Investment gateway that stands in for a payment processor.
//!
//! It waits for a configured latency and then answers with a scripted
//! outcome, which is how the demo behaves without a real backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    InvestmentGateway, InvestmentGatewayError, InvestmentReceipt, InvestmentRequest,
};

/// Latency the demo client waited before confirming an investment.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

const PAYMENT_METHOD: &str = "bank_transfer";

/// Scripted answer returned after the latency elapses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SimulatedOutcome {
    /// Settle every request.
    #[default]
    Settle,
    /// Refuse every request with the given reason.
    Reject(String),
    /// Report the processor as unreachable.
    Unavailable(String),
}

/// Gateway that sleeps and then returns a scripted outcome.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    outcome: SimulatedOutcome,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl SimulatedGateway {
    /// Creates a gateway that settles after `latency`.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            outcome: SimulatedOutcome::Settle,
        }
    }

    /// Replaces the scripted outcome.
    #[must_use]
    pub fn with_outcome(mut self, outcome: SimulatedOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

#[async_trait]
impl InvestmentGateway for SimulatedGateway {
    async fn submit_investment(
        &self,
        request: &InvestmentRequest,
    ) -> Result<InvestmentReceipt, InvestmentGatewayError> {
        debug!(
            project_id = %request.project_id,
            amount = request.amount,
            latency_ms = u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX),
            "simulating investment settlement"
        );
        tokio::time::sleep(self.latency).await;
        match &self.outcome {
            SimulatedOutcome::Settle => Ok(InvestmentReceipt {
                reference: format!("sim_{}", Uuid::new_v4().simple()),
                payment_method: PAYMENT_METHOD.to_owned(),
            }),
            SimulatedOutcome::Reject(reason) => {
                Err(InvestmentGatewayError::rejected(reason.as_str()))
            }
            SimulatedOutcome::Unavailable(message) => {
                Err(InvestmentGatewayError::unavailable(message.as_str()))
            }
        }
    }
}
