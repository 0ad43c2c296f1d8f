//! Cascading tax application
//!
//! Taxes apply sequentially in ascending priority order, each computed on the
//! running amount after the prior taxes, not all on the original base. Each
//! step rounds to the currency's 2 decimal places before feeding the next so
//! rounding drift cannot compound across long cascades.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, TaxTypeId};
use domain_catalog::TaxType;

/// One step of the cascade, kept for itemized receipts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxStep {
    /// Tax type applied at this step
    pub tax_type_id: TaxTypeId,
    /// Receipt code of the tax
    pub tax_code: String,
    /// Percentage applied
    pub percentage: Decimal,
    /// Running amount the tax was computed on
    pub base: Money,
    /// Tax amount of this step, rounded to currency
    pub tax_amount: Money,
    /// Running amount after this step
    pub running: Money,
}

/// Result of applying a tax cascade to a net amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxedAmount {
    /// Net amount the cascade started from
    pub net: Money,
    /// Final amount after all taxes
    pub gross: Money,
    /// Per-tax breakdown in application order
    pub steps: Vec<TaxStep>,
}

impl TaxedAmount {
    /// Total tax across all steps
    pub fn total_tax(&self) -> Money {
        self.gross - self.net
    }
}

/// Applies an ordered set of tax types to a net amount
#[derive(Debug, Default)]
pub struct TaxCascade;

impl TaxCascade {
    pub fn new() -> Self {
        Self
    }

    /// Runs the cascade
    ///
    /// Taxes are ordered by ascending (priority, id); inactive tax types are
    /// skipped. An empty tax set is a no-op: gross equals net with an empty
    /// breakdown.
    pub fn apply(&self, net: Money, taxes: &[TaxType]) -> TaxedAmount {
        let mut ordered: Vec<&TaxType> = taxes.iter().filter(|t| t.status.is_active()).collect();
        ordered.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.id.cmp(&b.id)));

        let mut running = net.round_to_currency();
        let mut steps = Vec::with_capacity(ordered.len());

        for tax in ordered {
            let tax_amount = running
                .multiply(tax.percentage / dec!(100))
                .round_to_currency();
            let after = running + tax_amount;

            steps.push(TaxStep {
                tax_type_id: tax.id,
                tax_code: tax.tax_code.clone(),
                percentage: tax.percentage,
                base: running,
                tax_amount,
                running: after,
            });

            running = after;
        }

        TaxedAmount {
            net: net.round_to_currency(),
            gross: running,
            steps,
        }
    }
}
