//! The billing engine
//!
//! `BillingEngine` is the composition root: it reads snapshots through the
//! catalog and billing ports and delegates to the pure domain services.
//! All computation stays in the domain crates; this layer only fetches,
//! wires, and logs.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use core_kernel::{ApartId, ProductId, RegistrationId};
use domain_billing::{
    BillingPort, FinancialSummary, FinancialSummaryAggregator, PaymentPlanReconciler,
    ProductCharge, Reconciliation,
};
use domain_catalog::{CatalogPort, SeasonCode};
use domain_pricing::{PriceResolver, PricingError, QuoteRequest, ResolvedPrice};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Pricing and reconciliation over the domain ports
pub struct BillingEngine {
    catalog: Arc<dyn CatalogPort>,
    billing: Arc<dyn BillingPort>,
    config: EngineConfig,
    resolver: PriceResolver,
    reconciler: PaymentPlanReconciler,
    aggregator: FinancialSummaryAggregator,
}

impl BillingEngine {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        billing: Arc<dyn BillingPort>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            billing,
            config,
            resolver: PriceResolver::new(),
            reconciler: PaymentPlanReconciler::new(),
            aggregator: FinancialSummaryAggregator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves a fully itemized quote
    ///
    /// # Errors
    ///
    /// - `EngineError::Port` when a port read fails
    /// - `EngineError::Pricing` for unknown products, missing prices, or
    ///   overlapping price windows
    #[instrument(skip(self), fields(%apart_id, %product_id, %season))]
    pub async fn resolve_price(
        &self,
        apart_id: ApartId,
        product_id: ProductId,
        season: SeasonCode,
        on_date: NaiveDate,
        nights: u32,
    ) -> Result<ResolvedPrice, EngineError> {
        let product = self.catalog.get_product(product_id, None).await?;

        let request = QuoteRequest {
            apart_id,
            product_id,
            season: season.clone(),
            on_date,
            nights,
        };

        let rows = self
            .catalog
            .get_prices(apart_id, product_id, season, on_date, None)
            .await?;
        let row_refs: Vec<&domain_catalog::Price> = rows.iter().collect();
        let row = self.resolver.select_row(&request, &row_refs).map_err(|e| {
            if let PricingError::OverlappingPrices { count, .. } = &e {
                warn!(count, "overlapping price windows, refusing to quote");
            }
            e
        })?;

        let rules = self.catalog.get_active_discount_rules(on_date, None).await?;
        let taxes = self.catalog.get_tax_types(row.tax_ids.clone(), None).await?;

        let quote = self
            .resolver
            .quote(&request, row, product.category_id, &rules, &taxes);
        debug!(gross = %quote.gross, "price resolved");
        Ok(quote)
    }

    /// Reconciles a registration's plan against its ledger
    #[instrument(skip(self), fields(%registration_id, %as_of))]
    pub async fn reconcile(
        &self,
        registration_id: RegistrationId,
        as_of: NaiveDate,
    ) -> Result<Reconciliation, EngineError> {
        let plan = self.billing.get_payment_plan(registration_id, None).await?;
        let ledger = self.billing.get_ledger(registration_id, None).await?;

        let reconciliation =
            self.reconciler
                .reconcile(&plan, &ledger, as_of, self.config.tolerance())?;
        debug!(
            installments = reconciliation.installments.len(),
            net_paid = %reconciliation.net_paid,
            "plan reconciled"
        );
        Ok(reconciliation)
    }

    /// Reconciles and condenses into the registration screen's summary
    ///
    /// `charges` are optional registration-time quotes for the itemized
    /// per-product rollup.
    pub async fn summarize(
        &self,
        registration_id: RegistrationId,
        as_of: NaiveDate,
        charges: &[ProductCharge],
    ) -> Result<FinancialSummary, EngineError> {
        let reconciliation = self.reconcile(registration_id, as_of).await?;
        Ok(self.aggregator.summarize(&reconciliation, charges)?)
    }
}
