//! Pricing domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{ApartId, ProductId};
use domain_catalog::SeasonCode;

/// Errors that can occur during price resolution
///
/// A missing or ambiguous price row is fatal to the specific quote and must
/// reach the caller as an explicit "no price configured" state, never a
/// silent zero.
#[derive(Debug, Error)]
pub enum PricingError {
    /// No active price row covers the tuple on the date
    #[error("No price configured for apart {apart_id}, product {product_id}, season {season} on {on_date}")]
    PriceNotFound {
        apart_id: ApartId,
        product_id: ProductId,
        season: SeasonCode,
        on_date: NaiveDate,
    },

    /// More than one price row covers the tuple on the date
    ///
    /// Overlapping windows for the same tuple are a data-integrity violation
    /// upstream; the engine refuses to pick one.
    #[error("{count} overlapping price rows for apart {apart_id}, product {product_id}, season {season} on {on_date}")]
    OverlappingPrices {
        count: usize,
        apart_id: ApartId,
        product_id: ProductId,
        season: SeasonCode,
        on_date: NaiveDate,
    },

    /// The quoted product is not in the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

impl PricingError {
    /// Returns true for the "no usable price row" family (zero or overlapping)
    pub fn is_price_not_found(&self) -> bool {
        matches!(
            self,
            PricingError::PriceNotFound { .. } | PricingError::OverlappingPrices { .. }
        )
    }
}
