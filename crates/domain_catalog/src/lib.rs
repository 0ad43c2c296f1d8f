//! Catalog Domain - Products, Discount Rules, Taxes, and Price Lists
//!
//! This crate owns the read-mostly reference data of the dormitory finance
//! system and the immutable [`CatalogIndex`] snapshot the pricing engine
//! queries. The data model replaces the stringly-typed flags of the admin
//! forms with sum types: a discount rule's target is a [`RuleScope`] (product,
//! category, or global) and its value a [`DiscountKind`] (percentage or fixed),
//! so illegal combinations cannot be constructed.

pub mod discount;
pub mod error;
pub mod index;
pub mod ports;
pub mod price;
pub mod product;
pub mod tax;

pub use discount::{DiscountCategory, DiscountKind, DiscountRule, RuleScope, Specificity};
pub use error::CatalogError;
pub use index::{CatalogIndex, CatalogIndexBuilder};
pub use ports::CatalogPort;
pub use price::{Price, SeasonCode};
pub use product::{EntityStatus, Product, ProductCategory};
pub use tax::TaxType;
