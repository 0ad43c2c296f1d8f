//! Seasonal price rows
//!
//! A price row binds a unit price to an (apartment, product, season) tuple
//! over a date window, with a set of attached tax types. Overlapping windows
//! for the same tuple are a data-integrity violation that the pricing engine
//! surfaces instead of resolving silently.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ApartId, DateRange, Money, PriceId, ProductId, TaxTypeId};

use crate::error::CatalogError;
use crate::product::EntityStatus;

/// A short season code (e.g., "2025-FALL")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonCode(String);

impl SeasonCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeasonCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// A seasonal price row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Unique identifier
    pub id: PriceId,
    /// Apartment the price applies to
    pub apart_id: ApartId,
    /// Product being priced
    pub product_id: ProductId,
    /// Season code
    pub season: SeasonCode,
    /// Unit price, strictly positive
    pub amount: Money,
    /// Validity window (inclusive)
    pub window: DateRange,
    /// Attached tax types; taxes are attached/detached independently
    pub tax_ids: Vec<TaxTypeId>,
    /// Status
    pub status: EntityStatus,
}

impl Price {
    /// Creates a new active price row
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPrice` for a non-positive amount.
    pub fn new(
        id: PriceId,
        apart_id: ApartId,
        product_id: ProductId,
        season: SeasonCode,
        amount: Money,
        window: DateRange,
    ) -> Result<Self, CatalogError> {
        if !amount.is_positive() {
            return Err(CatalogError::InvalidPrice(format!(
                "price must be positive, got {amount}"
            )));
        }

        Ok(Self {
            id,
            apart_id,
            product_id,
            season,
            amount,
            window,
            tax_ids: Vec::new(),
            status: EntityStatus::Active,
        })
    }

    /// Attaches a tax type; duplicates are ignored
    pub fn attach_tax(mut self, tax_id: TaxTypeId) -> Self {
        if !self.tax_ids.contains(&tax_id) {
            self.tax_ids.push(tax_id);
        }
        self
    }

    /// Detaches a tax type if present
    pub fn detach_tax(&mut self, tax_id: TaxTypeId) {
        self.tax_ids.retain(|id| *id != tax_id);
    }

    /// Returns true if the row is active and its window contains the date
    pub fn is_in_effect_on(&self, date: chrono::NaiveDate) -> bool {
        self.status.is_active() && self.window.contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn window() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let result = Price::new(
            PriceId::new(),
            ApartId::new(),
            ProductId::new(),
            SeasonCode::from("2025-FALL"),
            Money::zero(Currency::TRY),
            window(),
        );
        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn test_attach_tax_deduplicates() {
        let tax = TaxTypeId::new();
        let price = Price::new(
            PriceId::new(),
            ApartId::new(),
            ProductId::new(),
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(1000), Currency::TRY),
            window(),
        )
        .unwrap()
        .attach_tax(tax)
        .attach_tax(tax);

        assert_eq!(price.tax_ids.len(), 1);
    }

    #[test]
    fn test_detach_tax() {
        let tax = TaxTypeId::new();
        let mut price = Price::new(
            PriceId::new(),
            ApartId::new(),
            ProductId::new(),
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(1000), Currency::TRY),
            window(),
        )
        .unwrap()
        .attach_tax(tax);

        price.detach_tax(tax);
        assert!(price.tax_ids.is_empty());
    }

    #[test]
    fn test_in_effect_window() {
        let price = Price::new(
            PriceId::new(),
            ApartId::new(),
            ProductId::new(),
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(1000), Currency::TRY),
            window(),
        )
        .unwrap();

        assert!(price.is_in_effect_on(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
        assert!(!price.is_in_effect_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }
}
