//! Immutable catalog snapshot with scoped lookups
//!
//! `CatalogIndex` holds the reference data (products, categories, discount
//! rules, tax types, price rows) behind fast keyed queries. It is built once
//! from a snapshot and never mutated; the engine treats it as read-only input.
//!
//! # Invariants
//!
//! - Every product references a registered category
//! - Every rule scope targets a registered product or category
//! - Every price row references a registered product and registered tax types
//! - No duplicate ids within an entity kind

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use core_kernel::{ApartId, DiscountCategoryId, ProductCategoryId, ProductId, TaxTypeId};

use crate::discount::{DiscountCategory, DiscountRule, RuleScope};
use crate::error::CatalogError;
use crate::price::{Price, SeasonCode};
use crate::product::{Product, ProductCategory};
use crate::tax::TaxType;

/// Key for price lookups: one price list per (apart, product, season)
type PriceKey = (ApartId, ProductId, SeasonCode);

/// Immutable, time-boxed catalog lookup
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    products: HashMap<ProductId, Product>,
    categories: HashMap<ProductCategoryId, ProductCategory>,
    discount_categories: HashMap<DiscountCategoryId, DiscountCategory>,
    rules: Vec<DiscountRule>,
    taxes: HashMap<TaxTypeId, TaxType>,
    prices: HashMap<PriceKey, Vec<Price>>,
}

impl CatalogIndex {
    /// Starts building an index
    pub fn builder() -> CatalogIndexBuilder {
        CatalogIndexBuilder::default()
    }

    /// Looks up a product
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Returns the category of a product
    pub fn category_of(&self, product_id: ProductId) -> Option<ProductCategoryId> {
        self.products.get(&product_id).map(|p| p.category_id)
    }

    /// Looks up a product category
    pub fn product_category(&self, id: ProductCategoryId) -> Option<&ProductCategory> {
        self.categories.get(&id)
    }

    /// Looks up a discount category
    pub fn discount_category(&self, id: DiscountCategoryId) -> Option<&DiscountCategory> {
        self.discount_categories.get(&id)
    }

    /// Returns the discount rules active on a date
    ///
    /// Inactive rules and rules whose window does not contain the date are
    /// excluded; they stay in the index for audit queries.
    pub fn active_rules_on(&self, date: NaiveDate) -> Vec<&DiscountRule> {
        self.rules.iter().filter(|r| r.is_active_on(date)).collect()
    }

    /// Returns every rule, including inactive ones
    pub fn all_rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Returns the price rows in effect for a tuple on a date
    ///
    /// All matches are returned; zero or multiple matches are the caller's
    /// decision (the price resolver treats both as errors).
    pub fn prices_for(
        &self,
        apart_id: ApartId,
        product_id: ProductId,
        season: &SeasonCode,
        on_date: NaiveDate,
    ) -> Vec<&Price> {
        self.prices
            .get(&(apart_id, product_id, season.clone()))
            .map(|rows| {
                rows.iter()
                    .filter(|p| p.is_in_effect_on(on_date))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolves tax type ids to active tax types
    ///
    /// Unknown or inactive ids are skipped with a debug log; a missing tax is
    /// a no-op for the cascade, not an error.
    pub fn tax_types(&self, ids: &[TaxTypeId]) -> Vec<&TaxType> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            match self.taxes.get(id) {
                Some(tax) if tax.status.is_active() => found.push(tax),
                Some(_) => debug!(tax_id = %id, "skipping inactive tax type"),
                None => debug!(tax_id = %id, "skipping unknown tax type"),
            }
        }
        found
    }
}

/// Builder validating referential integrity before producing a [`CatalogIndex`]
#[derive(Debug, Default)]
pub struct CatalogIndexBuilder {
    products: Vec<Product>,
    categories: Vec<ProductCategory>,
    discount_categories: Vec<DiscountCategory>,
    rules: Vec<DiscountRule>,
    taxes: Vec<TaxType>,
    prices: Vec<Price>,
}

impl CatalogIndexBuilder {
    pub fn category(mut self, category: ProductCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn discount_category(mut self, category: DiscountCategory) -> Self {
        self.discount_categories.push(category);
        self
    }

    pub fn rule(mut self, rule: DiscountRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn tax(mut self, tax: TaxType) -> Self {
        self.taxes.push(tax);
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }

    /// Validates the snapshot and produces the index
    ///
    /// # Errors
    ///
    /// - `Duplicate` for a repeated id within an entity kind
    /// - `UnknownReference` for a dangling product/category/tax reference
    pub fn build(self) -> Result<CatalogIndex, CatalogError> {
        let mut categories = HashMap::new();
        for category in self.categories {
            if categories.insert(category.id, category.clone()).is_some() {
                return Err(CatalogError::Duplicate {
                    entity: "product category",
                    id: category.id.to_string(),
                });
            }
        }

        let mut products = HashMap::new();
        for product in self.products {
            if !categories.contains_key(&product.category_id) {
                return Err(CatalogError::UnknownReference {
                    entity: "product category",
                    referrer: "product",
                    id: product.category_id.to_string(),
                });
            }
            if products.insert(product.id, product.clone()).is_some() {
                return Err(CatalogError::Duplicate {
                    entity: "product",
                    id: product.id.to_string(),
                });
            }
        }

        let mut discount_categories = HashMap::new();
        for category in self.discount_categories {
            if discount_categories
                .insert(category.id, category.clone())
                .is_some()
            {
                return Err(CatalogError::Duplicate {
                    entity: "discount category",
                    id: category.id.to_string(),
                });
            }
        }

        let mut taxes = HashMap::new();
        for tax in self.taxes {
            if taxes.insert(tax.id, tax.clone()).is_some() {
                return Err(CatalogError::Duplicate {
                    entity: "tax type",
                    id: tax.id.to_string(),
                });
            }
        }

        let mut seen_rules = HashMap::new();
        for rule in &self.rules {
            if seen_rules.insert(rule.id, ()).is_some() {
                return Err(CatalogError::Duplicate {
                    entity: "discount rule",
                    id: rule.id.to_string(),
                });
            }
            if !discount_categories.contains_key(&rule.discount_category_id) {
                return Err(CatalogError::UnknownReference {
                    entity: "discount category",
                    referrer: "discount rule",
                    id: rule.discount_category_id.to_string(),
                });
            }
            match rule.scope {
                RuleScope::Product { product_id } => {
                    if !products.contains_key(&product_id) {
                        return Err(CatalogError::UnknownReference {
                            entity: "product",
                            referrer: "discount rule",
                            id: product_id.to_string(),
                        });
                    }
                }
                RuleScope::Category { category_id } => {
                    if !categories.contains_key(&category_id) {
                        return Err(CatalogError::UnknownReference {
                            entity: "product category",
                            referrer: "discount rule",
                            id: category_id.to_string(),
                        });
                    }
                }
                RuleScope::Global => {}
            }
        }

        let mut prices: HashMap<PriceKey, Vec<Price>> = HashMap::new();
        let mut seen_prices = HashMap::new();
        for price in self.prices {
            if seen_prices.insert(price.id, ()).is_some() {
                return Err(CatalogError::Duplicate {
                    entity: "price",
                    id: price.id.to_string(),
                });
            }
            if !products.contains_key(&price.product_id) {
                return Err(CatalogError::UnknownReference {
                    entity: "product",
                    referrer: "price",
                    id: price.product_id.to_string(),
                });
            }
            for tax_id in &price.tax_ids {
                if !taxes.contains_key(tax_id) {
                    return Err(CatalogError::UnknownReference {
                        entity: "tax type",
                        referrer: "price",
                        id: tax_id.to_string(),
                    });
                }
            }
            prices
                .entry((price.apart_id, price.product_id, price.season.clone()))
                .or_default()
                .push(price);
        }

        Ok(CatalogIndex {
            products,
            categories,
            discount_categories,
            rules: self.rules,
            taxes,
            prices,
        })
    }
}
