//! Engine configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::{Currency, Money};

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Over-payment beyond this amount flags the reconciliation
    pub over_allocation_tolerance: Decimal,
    /// Currency the engine operates in
    pub currency: Currency,
    /// Log level
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            over_allocation_tolerance: dec!(0.01),
            currency: Currency::TRY,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from `ENGINE_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("ENGINE"))
            .build()?
            .try_deserialize()
    }

    /// The tolerance as money in the engine currency
    pub fn tolerance(&self) -> Money {
        Money::new(self.over_allocation_tolerance, self.currency)
    }
}
