//! Discount categories and discount rules
//!
//! A discount rule carries a scope (product-specific, category-wide, or
//! global), a validity window, optional price/nights eligibility bands, and a
//! priority used to rank competing rules of the same scope. Scope and value
//! kind are sum types so that illegal combinations (a rule bound to both a
//! product and a category, a percentage above 100) cannot be represented.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, DiscountCategoryId, DiscountRuleId, Money, ProductCategoryId, ProductId};

use crate::error::CatalogError;
use crate::product::EntityStatus;

/// A named grouping of discount rules (e.g., "Early bird", "Sibling")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCategory {
    /// Unique identifier
    pub id: DiscountCategoryId,
    /// Display name
    pub name: String,
    /// Status
    pub status: EntityStatus,
}

impl DiscountCategory {
    /// Creates a new active discount category
    pub fn new(id: DiscountCategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: EntityStatus::Active,
        }
    }
}

/// What a discount rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum RuleScope {
    /// Applies to one product only
    Product { product_id: ProductId },
    /// Applies to every product in a category
    Category { category_id: ProductCategoryId },
    /// Applies to everything
    Global,
}

impl RuleScope {
    /// Specificity tier for rule selection: narrower scope always wins
    pub fn specificity(&self) -> Specificity {
        match self {
            RuleScope::Product { .. } => Specificity::Product,
            RuleScope::Category { .. } => Specificity::Category,
            RuleScope::Global => Specificity::Global,
        }
    }

    /// Returns true if the scope covers the given product/category pair
    ///
    /// A category scope matches on the category alone; a product scope only
    /// on the exact product.
    pub fn covers(&self, product_id: ProductId, category_id: ProductCategoryId) -> bool {
        match self {
            RuleScope::Product { product_id: p } => *p == product_id,
            RuleScope::Category { category_id: c } => *c == category_id,
            RuleScope::Global => true,
        }
    }
}

/// Ordered specificity tiers: `Product > Category > Global`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specificity {
    Global = 0,
    Category = 1,
    Product = 2,
}

/// How the discount value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the base price, `0 < value <= 100`
    Percentage(Decimal),
    /// Fixed amount off, clamped to the base price at application time
    Fixed(Money),
}

impl DiscountKind {
    /// Computes the discount amount against a base price
    ///
    /// Percentage amounts round to the currency's 2 decimal places; a fixed
    /// amount never exceeds the base price, so the discounted net cannot go
    /// negative.
    pub fn amount_against(&self, base: Money) -> Money {
        match self {
            DiscountKind::Percentage(pct) => {
                base.multiply(*pct / dec!(100)).round_to_currency()
            }
            DiscountKind::Fixed(value) => value
                .min(&base)
                // a mismatched-currency amount grants nothing
                .unwrap_or_else(|_| Money::zero(base.currency()))
                .round_to_currency(),
        }
    }
}

/// A single discount rule
///
/// Constructed through [`DiscountRule::new`], which enforces the value
/// invariants; eligibility bands are attached with the builder methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// Unique identifier; also the final deterministic tie-break in selection
    pub id: DiscountRuleId,
    /// Grouping category
    pub discount_category_id: DiscountCategoryId,
    /// What the rule applies to
    pub scope: RuleScope,
    /// Validity window (inclusive)
    pub window: DateRange,
    /// Value of the discount
    pub kind: DiscountKind,
    /// Minimum base price for eligibility
    pub min_price: Option<Money>,
    /// Maximum base price for eligibility
    pub max_price: Option<Money>,
    /// Minimum stay length for eligibility
    pub min_nights: Option<u32>,
    /// Maximum stay length for eligibility
    pub max_nights: Option<u32>,
    /// Rank among competing rules of the same specificity (higher wins)
    pub priority: u32,
    /// Status; inactive rules are kept for audit but never selected
    pub status: EntityStatus,
}

impl DiscountRule {
    /// Creates a new active rule
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRule` when the discount value is not
    /// positive, a percentage exceeds 100, or the priority is zero.
    pub fn new(
        id: DiscountRuleId,
        discount_category_id: DiscountCategoryId,
        scope: RuleScope,
        window: DateRange,
        kind: DiscountKind,
        priority: u32,
    ) -> Result<Self, CatalogError> {
        match &kind {
            DiscountKind::Percentage(pct) => {
                if *pct <= Decimal::ZERO || *pct > dec!(100) {
                    return Err(CatalogError::InvalidRule(format!(
                        "percentage must be in (0, 100], got {pct}"
                    )));
                }
            }
            DiscountKind::Fixed(value) => {
                if !value.is_positive() {
                    return Err(CatalogError::InvalidRule(format!(
                        "fixed discount must be positive, got {value}"
                    )));
                }
            }
        }
        if priority < 1 {
            return Err(CatalogError::InvalidRule(
                "priority must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            id,
            discount_category_id,
            scope,
            window,
            kind,
            min_price: None,
            max_price: None,
            min_nights: None,
            max_nights: None,
            priority,
            status: EntityStatus::Active,
        })
    }

    /// Restricts eligibility to a base-price band (either bound optional)
    pub fn with_price_band(
        mut self,
        min: Option<Money>,
        max: Option<Money>,
    ) -> Result<Self, CatalogError> {
        if let (Some(min), Some(max)) = (&min, &max) {
            if min.partial_cmp(max) == Some(std::cmp::Ordering::Greater) {
                return Err(CatalogError::InvalidRule(format!(
                    "min price {min} exceeds max price {max}"
                )));
            }
        }
        self.min_price = min;
        self.max_price = max;
        Ok(self)
    }

    /// Restricts eligibility to a stay-length band (either bound optional)
    pub fn with_nights_band(
        mut self,
        min: Option<u32>,
        max: Option<u32>,
    ) -> Result<Self, CatalogError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CatalogError::InvalidRule(format!(
                    "min nights {min} exceeds max nights {max}"
                )));
            }
        }
        self.min_nights = min;
        self.max_nights = max;
        Ok(self)
    }

    /// Marks the rule inactive (kept for audit)
    pub fn deactivate(&mut self) {
        self.status = EntityStatus::Inactive;
    }

    /// Returns true if the rule is active and its window contains the date
    pub fn is_active_on(&self, date: chrono::NaiveDate) -> bool {
        self.status.is_active() && self.window.contains(date)
    }

    /// Returns true if the base price and nights fall inside the bands
    pub fn bands_admit(&self, price: Money, nights: u32) -> bool {
        use std::cmp::Ordering;

        if let Some(min) = &self.min_price {
            if matches!(price.partial_cmp(min), Some(Ordering::Less) | None) {
                return false;
            }
        }
        if let Some(max) = &self.max_price {
            if matches!(price.partial_cmp(max), Some(Ordering::Greater) | None) {
                return false;
            }
        }
        if let Some(min) = self.min_nights {
            if nights < min {
                return false;
            }
        }
        if let Some(max) = self.max_nights {
            if nights > max {
                return false;
            }
        }
        true
    }
}
