//! Core Kernel - Foundational types for the dormitory finance system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Date-range types for seasonal price and rule windows
//! - Strongly-typed identifiers
//! - Port plumbing shared by the catalog and billing collaborator interfaces

pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use identifiers::{
    ApartId, DiscountCategoryId, DiscountRuleId, PaymentId, PlanEntryId, PriceId,
    ProductCategoryId, ProductId, RegistrationId, TaxTypeId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{DomainPort, OperationMetadata, PortError};
pub use temporal::{DateRange, TemporalError};
