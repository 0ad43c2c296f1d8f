//! Tax types
//!
//! Taxes are cascading: each tax type carries a priority, and the pricing
//! engine applies them in ascending priority order on the running amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Rate, TaxTypeId};

use crate::error::CatalogError;
use crate::product::EntityStatus;

/// A tax type (e.g., VAT, accommodation tax)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxType {
    /// Unique identifier; tie-break within a priority tier
    pub id: TaxTypeId,
    /// Short code shown on receipts (e.g., "KDV")
    pub tax_code: String,
    /// Percentage in `[0, 100]`
    pub percentage: Decimal,
    /// Cascade position; lower priorities apply first
    pub priority: u32,
    /// Status
    pub status: EntityStatus,
}

impl TaxType {
    /// Creates a new active tax type
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidTax` for a percentage outside `[0, 100]`
    /// or a zero priority.
    pub fn new(
        id: TaxTypeId,
        tax_code: impl Into<String>,
        percentage: Decimal,
        priority: u32,
    ) -> Result<Self, CatalogError> {
        if percentage < Decimal::ZERO || percentage > dec!(100) {
            return Err(CatalogError::InvalidTax(format!(
                "percentage must be in [0, 100], got {percentage}"
            )));
        }
        if priority < 1 {
            return Err(CatalogError::InvalidTax(
                "priority must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            id,
            tax_code: tax_code.into(),
            percentage,
            priority,
            status: EntityStatus::Active,
        })
    }

    /// Returns the percentage as a rate
    pub fn rate(&self) -> Rate {
        Rate::from_percentage(self.percentage)
    }

    /// Marks the tax type inactive
    pub fn deactivate(&mut self) {
        self.status = EntityStatus::Inactive;
    }
}
