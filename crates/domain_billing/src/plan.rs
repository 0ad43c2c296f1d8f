//! Payment plans
//!
//! A payment plan is the agreed installment schedule of a registration:
//! an optional deposit plus dated installments. Entries carry no status
//! column; an installment's state is derived at query time from the ledger,
//! so plan rows never go stale against late-arriving payments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PlanEntryId, RegistrationId};

use crate::error::BillingError;

/// Derived state of one installment
///
/// Never persisted. `Paid` is terminal for a given snapshot; `Overdue` is
/// evaluated lazily against the query date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// No money allocated yet, not past due
    Planned,
    /// Partially covered, not past due
    PartialPaid,
    /// Fully covered
    Paid,
    /// Past due and not fully covered
    Overdue,
}

impl InstallmentStatus {
    /// Returns true if no further payment is expected
    pub fn is_settled(&self) -> bool {
        matches!(self, InstallmentStatus::Paid)
    }
}

/// One row of a payment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanEntry {
    /// Unique identifier
    pub id: PlanEntryId,
    /// Registration this plan belongs to
    pub registration_id: RegistrationId,
    /// Agreed due date
    pub planned_date: NaiveDate,
    /// Agreed amount, strictly positive
    pub planned_amount: Money,
    /// Deposits are settled before regular installments
    pub is_deposit: bool,
}

impl PaymentPlanEntry {
    /// Creates a plan entry
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidPlanEntry` for a non-positive amount.
    pub fn new(
        id: PlanEntryId,
        registration_id: RegistrationId,
        planned_date: NaiveDate,
        planned_amount: Money,
        is_deposit: bool,
    ) -> Result<Self, BillingError> {
        if !planned_amount.is_positive() {
            return Err(BillingError::InvalidPlanEntry(format!(
                "planned amount must be positive, got {planned_amount}"
            )));
        }

        Ok(Self {
            id,
            registration_id,
            planned_date,
            planned_amount,
            is_deposit,
        })
    }
}
