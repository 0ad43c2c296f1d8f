//! Financial summaries
//!
//! Condenses a reconciliation into the handful of numbers the registration
//! screen shows: total, paid, remaining, a 0..=100 progress figure, and the
//! last/next payment dates. Optionally carries the itemized per-product
//! charges the total came from.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, ProductId, RegistrationId};
use domain_pricing::ResolvedPrice;

use crate::error::BillingError;
use crate::reconcile::Reconciliation;

/// One product's share of a registration's charges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCharge {
    /// Product the quote was for
    pub product_id: ProductId,
    /// The itemized quote at registration time
    pub resolved: ResolvedPrice,
}

/// Headline numbers for one registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Registration summarized
    pub registration_id: RegistrationId,
    /// Sum of all planned amounts
    pub total_amount: Money,
    /// Net paid, capped at the total
    pub paid_amount: Money,
    /// Total minus paid, never negative
    pub remaining_amount: Money,
    /// Rounded percentage paid, 0 for an empty plan
    pub payment_progress: u8,
    /// Date of the most recent payment
    pub last_payment: Option<NaiveDate>,
    /// Earliest due date still open
    pub next_payment: Option<NaiveDate>,
    /// Credit beyond the plan, carried from reconciliation
    pub unallocated_credit: Money,
    /// Gross of the itemized product charges, when supplied
    pub charges_gross: Option<Money>,
}

/// Builds financial summaries from reconciliations
#[derive(Debug, Default)]
pub struct FinancialSummaryAggregator;

impl FinancialSummaryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarizes a reconciliation
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Money` when charge currencies differ from the
    /// plan currency.
    pub fn summarize(
        &self,
        reconciliation: &Reconciliation,
        charges: &[ProductCharge],
    ) -> Result<FinancialSummary, BillingError> {
        let total = reconciliation.total_planned();
        let paid = reconciliation.net_paid.min(&total)?;
        let remaining = total.checked_sub(&paid)?;

        let payment_progress = if total.is_zero() {
            0
        } else {
            // paid <= total, so this stays in 0..=100
            let pct = paid.amount() / total.amount() * Decimal::ONE_HUNDRED;
            pct.round().to_u8().unwrap_or(100)
        };

        let next_payment = reconciliation
            .installments
            .iter()
            .filter(|line| !line.status.is_settled())
            .map(|line| line.planned_date)
            .min();

        let charges_gross = match charges {
            [] => None,
            lines => {
                let mut sum = Money::zero(total.currency());
                for line in lines {
                    sum = sum.checked_add(&line.resolved.gross)?;
                }
                Some(sum)
            }
        };

        Ok(FinancialSummary {
            registration_id: reconciliation.registration_id,
            total_amount: total,
            paid_amount: paid,
            remaining_amount: remaining,
            payment_progress,
            last_payment: reconciliation.last_payment,
            next_payment,
            unallocated_credit: reconciliation.unallocated_credit,
            charges_gross,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerEntry, PaymentLedger};
    use crate::plan::PaymentPlanEntry;
    use crate::reconcile::PaymentPlanReconciler;
    use core_kernel::{Currency, PaymentId, PlanEntryId};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn try_lira(amount: Decimal) -> Money {
        Money::new(amount, Currency::TRY)
    }

    fn reconcile(
        registration: RegistrationId,
        plan: &[PaymentPlanEntry],
        payments: &[(Decimal, NaiveDate)],
        as_of: NaiveDate,
    ) -> Reconciliation {
        let mut ledger = PaymentLedger::new(registration, Currency::TRY);
        for (amount, date) in payments {
            ledger
                .record(
                    LedgerEntry::payment(PaymentId::new(), registration, *date, try_lira(*amount))
                        .unwrap(),
                )
                .unwrap();
        }
        PaymentPlanReconciler::new()
            .reconcile(plan, &ledger, as_of, try_lira(dec!(0.01)))
            .unwrap()
    }

    fn entry(
        registration: RegistrationId,
        date: NaiveDate,
        amount: Decimal,
        is_deposit: bool,
    ) -> PaymentPlanEntry {
        PaymentPlanEntry::new(
            PlanEntryId::new(),
            registration,
            date,
            try_lira(amount),
            is_deposit,
        )
        .unwrap()
    }

    #[test]
    fn test_headline_numbers() {
        let registration = RegistrationId::new();
        let plan = vec![
            entry(registration, d(2025, 9, 1), dec!(500), true),
            entry(registration, d(2025, 10, 1), dec!(500), false),
        ];
        let reconciliation = reconcile(
            registration,
            &plan,
            &[(dec!(700), d(2025, 9, 2))],
            d(2025, 9, 15),
        );

        let summary = FinancialSummaryAggregator::new()
            .summarize(&reconciliation, &[])
            .unwrap();

        assert_eq!(summary.total_amount.amount(), dec!(1000));
        assert_eq!(summary.paid_amount.amount(), dec!(700));
        assert_eq!(summary.remaining_amount.amount(), dec!(300));
        assert_eq!(summary.payment_progress, 70);
        assert_eq!(summary.last_payment, Some(d(2025, 9, 2)));
        assert_eq!(summary.next_payment, Some(d(2025, 10, 1)));
        assert!(summary.charges_gross.is_none());
    }

    #[test]
    fn test_empty_plan_has_zero_progress() {
        let registration = RegistrationId::new();
        let reconciliation = reconcile(registration, &[], &[], d(2025, 9, 15));

        let summary = FinancialSummaryAggregator::new()
            .summarize(&reconciliation, &[])
            .unwrap();

        assert_eq!(summary.payment_progress, 0);
        assert!(summary.total_amount.is_zero());
        assert!(summary.next_payment.is_none());
    }

    #[test]
    fn test_overpaid_caps_at_total() {
        let registration = RegistrationId::new();
        let plan = vec![entry(registration, d(2025, 9, 1), dec!(500), false)];
        let reconciliation = reconcile(
            registration,
            &plan,
            &[(dec!(800), d(2025, 9, 1))],
            d(2025, 9, 15),
        );

        let summary = FinancialSummaryAggregator::new()
            .summarize(&reconciliation, &[])
            .unwrap();

        assert_eq!(summary.paid_amount.amount(), dec!(500));
        assert_eq!(summary.remaining_amount.amount(), dec!(0));
        assert_eq!(summary.payment_progress, 100);
        assert_eq!(summary.unallocated_credit.amount(), dec!(300));
    }

    #[test]
    fn test_fully_paid_has_no_next_payment() {
        let registration = RegistrationId::new();
        let plan = vec![entry(registration, d(2025, 9, 1), dec!(500), false)];
        let reconciliation = reconcile(
            registration,
            &plan,
            &[(dec!(500), d(2025, 9, 1))],
            d(2025, 9, 15),
        );

        let summary = FinancialSummaryAggregator::new()
            .summarize(&reconciliation, &[])
            .unwrap();
        assert!(summary.next_payment.is_none());
    }

    #[test]
    fn test_progress_rounds() {
        let registration = RegistrationId::new();
        let plan = vec![entry(registration, d(2025, 9, 1), dec!(300), false)];
        let reconciliation = reconcile(
            registration,
            &plan,
            &[(dec!(100), d(2025, 8, 1))],
            d(2025, 8, 15),
        );

        let summary = FinancialSummaryAggregator::new()
            .summarize(&reconciliation, &[])
            .unwrap();
        // 100/300 = 33.33 -> 33
        assert_eq!(summary.payment_progress, 33);
    }
}
