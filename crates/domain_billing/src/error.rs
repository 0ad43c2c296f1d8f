//! Billing domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PaymentId, RegistrationId};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Plan entry validation failure
    #[error("Invalid payment plan entry: {0}")]
    InvalidPlanEntry(String),

    /// Ledger entry validation failure
    #[error("Invalid ledger entry: {0}")]
    InvalidLedgerEntry(String),

    /// Entry belongs to a different registration than the ledger/plan
    #[error("Registration mismatch: expected {expected}, got {got}")]
    RegistrationMismatch {
        expected: RegistrationId,
        got: RegistrationId,
    },

    /// Reversal target does not exist in the ledger
    #[error("Unknown payment: {0}")]
    UnknownPayment(PaymentId),

    /// Reversal target has already been reversed
    #[error("Payment already reversed: {0}")]
    AlreadyReversed(PaymentId),

    /// Monetary arithmetic failure (currency mismatch, overflow)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
