//! Billing Domain - Payment Plans, Ledger, Reconciliation, Summaries
//!
//! The write side is an append-only signed ledger ([`PaymentLedger`]);
//! everything the user sees is derived from it at query time. Installment
//! statuses are never stored: [`PaymentPlanReconciler`] allocates the net
//! ledger position across the plan (deposits first, then due-date order)
//! and the statuses fall out of the allocation. [`FinancialSummaryAggregator`]
//! condenses a reconciliation into the registration screen's headline
//! numbers.

pub mod error;
pub mod ledger;
pub mod plan;
pub mod ports;
pub mod reconcile;
pub mod summary;

pub use error::BillingError;
pub use ledger::{LedgerEntry, PaymentLedger};
pub use plan::{InstallmentStatus, PaymentPlanEntry};
pub use ports::BillingPort;
pub use reconcile::{PaymentPlanReconciler, ReconciledInstallment, Reconciliation};
pub use summary::{FinancialSummary, FinancialSummaryAggregator, ProductCharge};
