//! Pricing Domain - Discount Resolution, Tax Cascades, Price Quotes
//!
//! Pure computation over catalog snapshots. The three moving parts:
//!
//! - [`DiscountResolver`]: deterministic single-winner rule selection
//! - [`TaxCascade`]: sequential taxes on the running amount
//! - [`PriceResolver`]: row selection plus the full itemized quote
//!
//! Nothing here performs I/O; the engine crate feeds these from its ports.

pub mod cascade;
pub mod error;
pub mod quote;
pub mod resolver;

pub use cascade::{TaxCascade, TaxStep, TaxedAmount};
pub use error::PricingError;
pub use quote::{PriceResolver, QuoteRequest, ResolvedPrice};
pub use resolver::{DiscountContext, DiscountResolver, SelectedDiscount};
