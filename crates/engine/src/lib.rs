//! Billing Engine - Composition Root
//!
//! Wires the catalog and billing ports to the pure pricing and
//! reconciliation services. Consumers construct a [`BillingEngine`] with
//! their adapters and an [`EngineConfig`]; the nightly job uses
//! [`batch::refresh_registrations`] to re-derive summaries concurrently.

pub mod batch;
pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::EngineError;
pub use service::BillingEngine;
