//! Payment plan reconciliation
//!
//! Matches the signed ledger against the installment schedule. The net paid
//! amount is allocated FIFO: deposits first, then installments by due date.
//! Statuses fall out of the allocation; nothing is stored. The function is
//! pure over its snapshots, so re-running it on the same inputs always
//! yields the same result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{Money, PlanEntryId, RegistrationId};

use crate::error::BillingError;
use crate::ledger::PaymentLedger;
use crate::plan::{InstallmentStatus, PaymentPlanEntry};

/// One installment with its allocation and derived status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledInstallment {
    /// Plan entry this line reconciles
    pub entry_id: PlanEntryId,
    /// Agreed due date
    pub planned_date: NaiveDate,
    /// Agreed amount
    pub planned_amount: Money,
    /// Amount covered by the ledger
    pub allocated: Money,
    /// Amount still owed on this installment
    pub outstanding: Money,
    /// Deposit flag carried from the plan
    pub is_deposit: bool,
    /// Derived status as of the reconciliation date
    pub status: InstallmentStatus,
}

/// The reconciled view of one registration's plan against its ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Registration reconciled
    pub registration_id: RegistrationId,
    /// Date the lazy statuses were evaluated against
    pub as_of: NaiveDate,
    /// Installments in allocation order
    pub installments: Vec<ReconciledInstallment>,
    /// Net ledger position floored at zero
    pub net_paid: Money,
    /// Credit left over after every installment is covered
    pub unallocated_credit: Money,
    /// True when the leftover exceeds the configured tolerance
    pub over_allocation: bool,
    /// Most recent payment date, for summaries
    pub last_payment: Option<NaiveDate>,
}

impl Reconciliation {
    /// Sum of all planned amounts
    pub fn total_planned(&self) -> Money {
        self.installments
            .iter()
            .fold(Money::zero(self.net_paid.currency()), |acc, line| {
                acc + line.planned_amount
            })
    }
}

/// Allocates ledger money across a payment plan
#[derive(Debug, Default)]
pub struct PaymentPlanReconciler;

impl PaymentPlanReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Reconciles a plan against a ledger
    ///
    /// Over-payment beyond `tolerance` sets the `over_allocation` flag and
    /// logs a warning; it never fails the reconciliation. A negative net
    /// ledger position allocates nothing.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Money` when plan and ledger currencies differ.
    pub fn reconcile(
        &self,
        plan: &[PaymentPlanEntry],
        ledger: &PaymentLedger,
        as_of: NaiveDate,
        tolerance: Money,
    ) -> Result<Reconciliation, BillingError> {
        let mut ordered: Vec<&PaymentPlanEntry> = plan.iter().collect();
        // deposits first, then due date, then id for determinism
        ordered.sort_by(|a, b| {
            b.is_deposit
                .cmp(&a.is_deposit)
                .then(a.planned_date.cmp(&b.planned_date))
                .then(a.id.cmp(&b.id))
        });

        let net_paid = ledger.net_total().floor_at_zero();
        let mut credit = net_paid;
        let mut installments = Vec::with_capacity(ordered.len());

        for entry in ordered {
            let allocated = credit.min(&entry.planned_amount)?;
            credit = credit.checked_sub(&allocated)?;
            let outstanding = entry.planned_amount.checked_sub(&allocated)?;

            let status = Self::derive_status(entry, allocated, outstanding, as_of);

            installments.push(ReconciledInstallment {
                entry_id: entry.id,
                planned_date: entry.planned_date,
                planned_amount: entry.planned_amount,
                allocated,
                outstanding,
                is_deposit: entry.is_deposit,
                status,
            });
        }

        let over_allocation = matches!(
            credit.partial_cmp(&tolerance),
            Some(std::cmp::Ordering::Greater)
        );
        if over_allocation {
            warn!(
                registration_id = %ledger.registration_id(),
                unallocated = %credit,
                tolerance = %tolerance,
                "ledger exceeds payment plan beyond tolerance"
            );
        }

        Ok(Reconciliation {
            registration_id: ledger.registration_id(),
            as_of,
            installments,
            net_paid,
            unallocated_credit: credit,
            over_allocation,
            last_payment: ledger.last_payment_date(),
        })
    }

    fn derive_status(
        entry: &PaymentPlanEntry,
        allocated: Money,
        outstanding: Money,
        as_of: NaiveDate,
    ) -> InstallmentStatus {
        if outstanding.is_zero() {
            return InstallmentStatus::Paid;
        }
        if as_of > entry.planned_date {
            return InstallmentStatus::Overdue;
        }
        if allocated.is_zero() {
            InstallmentStatus::Planned
        } else {
            InstallmentStatus::PartialPaid
        }
    }
}
