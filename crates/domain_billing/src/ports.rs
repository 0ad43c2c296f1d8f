//! Billing domain port
//!
//! The engine reads payment plans and ledgers through `BillingPort`; the
//! surrounding application provides a database-backed adapter, tests use the
//! in-memory mock.

use async_trait::async_trait;

use core_kernel::{DomainPort, OperationMetadata, PortError, RegistrationId};

use crate::ledger::PaymentLedger;
use crate::plan::PaymentPlanEntry;

/// Read-only access to billing data
#[async_trait]
pub trait BillingPort: DomainPort {
    /// Returns the payment plan of a registration
    ///
    /// An empty plan is a valid state (registration not yet scheduled), not
    /// an error.
    async fn get_payment_plan(
        &self,
        registration_id: RegistrationId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<PaymentPlanEntry>, PortError>;

    /// Returns the payment ledger of a registration
    async fn get_ledger(
        &self,
        registration_id: RegistrationId,
        metadata: Option<OperationMetadata>,
    ) -> Result<PaymentLedger, PortError>;
}

/// In-memory mock adapter for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock implementation of `BillingPort` over in-memory maps
    #[derive(Debug, Clone, Default)]
    pub struct MockBillingPort {
        plans: Arc<RwLock<HashMap<RegistrationId, Vec<PaymentPlanEntry>>>>,
        ledgers: Arc<RwLock<HashMap<RegistrationId, PaymentLedger>>>,
    }

    impl MockBillingPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds the plan of a registration
        pub async fn put_plan(&self, registration_id: RegistrationId, plan: Vec<PaymentPlanEntry>) {
            self.plans.write().await.insert(registration_id, plan);
        }

        /// Seeds the ledger of a registration
        pub async fn put_ledger(&self, ledger: PaymentLedger) {
            self.ledgers
                .write()
                .await
                .insert(ledger.registration_id(), ledger);
        }
    }

    impl DomainPort for MockBillingPort {}

    #[async_trait]
    impl BillingPort for MockBillingPort {
        async fn get_payment_plan(
            &self,
            registration_id: RegistrationId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<PaymentPlanEntry>, PortError> {
            Ok(self
                .plans
                .read()
                .await
                .get(&registration_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn get_ledger(
            &self,
            registration_id: RegistrationId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<PaymentLedger, PortError> {
            self.ledgers
                .read()
                .await
                .get(&registration_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("PaymentLedger", registration_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBillingPort;
    use super::*;
    use core_kernel::Currency;

    #[tokio::test]
    async fn test_mock_port_empty_plan() {
        let port = MockBillingPort::new();
        let plan = port.get_payment_plan(RegistrationId::new(), None).await.unwrap();
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_mock_port_ledger_round_trip() {
        let port = MockBillingPort::new();
        let registration = RegistrationId::new();
        let ledger = PaymentLedger::new(registration, Currency::TRY);
        port.put_ledger(ledger.clone()).await;

        let fetched = port.get_ledger(registration, None).await.unwrap();
        assert_eq!(fetched, ledger);
    }

    #[tokio::test]
    async fn test_mock_port_ledger_not_found() {
        let port = MockBillingPort::new();
        let result = port.get_ledger(RegistrationId::new(), None).await;
        assert!(result.unwrap_err().is_not_found());
    }
}
