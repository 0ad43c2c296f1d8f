//! Engine errors

use thiserror::Error;

use core_kernel::PortError;
use domain_billing::BillingError;
use domain_pricing::PricingError;

/// Errors surfaced by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// A port (data access) failure
    #[error("Port error: {0}")]
    Port(#[from] PortError),

    /// A price resolution failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// A reconciliation or summary failure
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),

    /// Configuration loading failure
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl EngineError {
    /// Returns true when a retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Port(e) if e.is_transient())
    }
}
