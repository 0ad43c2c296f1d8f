//! Products and product categories
//!
//! Products are the billable items of the housing system (bed, meal plan,
//! laundry package, ...). They are reference data: created and edited by the
//! catalog admin, referenced by prices and discount rules, never deleted while
//! priced.

use serde::{Deserialize, Serialize};

use core_kernel::{ProductCategoryId, ProductId};

/// Activation status shared by all catalog reference entities
///
/// Inactive entities are excluded from resolution but retained for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl EntityStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }
}

/// A billable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Category this product belongs to
    pub category_id: ProductCategoryId,
    /// Display name
    pub name: String,
    /// Status
    pub status: EntityStatus,
}

impl Product {
    /// Creates a new active product
    pub fn new(id: ProductId, category_id: ProductCategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            name: name.into(),
            status: EntityStatus::Active,
        }
    }

    /// Marks the product inactive
    pub fn deactivate(&mut self) {
        self.status = EntityStatus::Inactive;
    }
}

/// A grouping of products, used as a discount-rule scope target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Unique identifier
    pub id: ProductCategoryId,
    /// Display name
    pub name: String,
    /// Status
    pub status: EntityStatus,
}

impl ProductCategory {
    /// Creates a new active category
    pub fn new(id: ProductCategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: EntityStatus::Active,
        }
    }
}
