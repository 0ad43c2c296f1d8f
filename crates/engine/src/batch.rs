//! Batch reconciliation
//!
//! The nightly refresh re-derives every registration's summary so overdue
//! statuses move forward with the calendar. Registrations share no mutable
//! state, so each one reconciles in its own task.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

use core_kernel::RegistrationId;
use domain_billing::FinancialSummary;

use crate::error::EngineError;
use crate::service::BillingEngine;

/// Outcome of one registration's refresh
pub type RefreshResult = (RegistrationId, Result<FinancialSummary, EngineError>);

/// Reconciles each registration concurrently, collecting per-id results
///
/// A failing registration never aborts the batch; its error is returned in
/// its slot. Result order is unspecified.
pub async fn refresh_registrations(
    engine: Arc<BillingEngine>,
    ids: Vec<RegistrationId>,
    as_of: NaiveDate,
) -> Vec<RefreshResult> {
    let total = ids.len();
    let mut tasks = JoinSet::new();

    for id in ids {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            let result = engine.summarize(id, as_of, &[]).await;
            (id, result)
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => results.push(outcome),
            Err(join_error) => {
                // a panicking task loses its id; log and carry on
                error!(%join_error, "registration refresh task panicked");
            }
        }
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    info!(total, failed, %as_of, "registration refresh finished");
    results
}
