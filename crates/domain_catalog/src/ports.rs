//! Catalog domain port
//!
//! The engine reads catalog data through `CatalogPort`; the surrounding admin
//! application provides a database-backed adapter, tests use the in-memory
//! mock built over a [`CatalogIndex`] snapshot.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ApartId, DomainPort, OperationMetadata, PortError, ProductId, TaxTypeId};

use crate::discount::DiscountRule;
use crate::price::{Price, SeasonCode};
use crate::product::Product;
use crate::tax::TaxType;

/// Read-only access to catalog reference data
///
/// All methods take a snapshot view: the engine never writes through this
/// port, and repeated reads within one operation may legitimately observe
/// different snapshots (the engine derives from whatever it is given).
#[async_trait]
pub trait CatalogPort: DomainPort {
    /// Returns a product by id
    async fn get_product(
        &self,
        id: ProductId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError>;

    /// Returns the discount rules active on a date
    async fn get_active_discount_rules(
        &self,
        on_date: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<DiscountRule>, PortError>;

    /// Returns every price row in effect for the tuple on the date
    ///
    /// All matches are returned; the pricing engine treats zero or multiple
    /// rows as errors rather than resolving them silently.
    async fn get_prices(
        &self,
        apart_id: ApartId,
        product_id: ProductId,
        season: SeasonCode,
        on_date: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Price>, PortError>;

    /// Resolves tax type ids to active tax types (unknown ids skipped)
    async fn get_tax_types(
        &self,
        ids: Vec<TaxTypeId>,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<TaxType>, PortError>;
}

/// In-memory mock adapter for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use crate::index::CatalogIndex;
    use std::sync::Arc;

    /// Mock implementation of `CatalogPort` over an immutable index snapshot
    #[derive(Debug, Clone)]
    pub struct MockCatalogPort {
        index: Arc<CatalogIndex>,
    }

    impl MockCatalogPort {
        /// Wraps a built index
        pub fn new(index: CatalogIndex) -> Self {
            Self {
                index: Arc::new(index),
            }
        }
    }

    impl DomainPort for MockCatalogPort {}

    #[async_trait]
    impl CatalogPort for MockCatalogPort {
        async fn get_product(
            &self,
            id: ProductId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Product, PortError> {
            self.index
                .product(id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Product", id))
        }

        async fn get_active_discount_rules(
            &self,
            on_date: NaiveDate,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<DiscountRule>, PortError> {
            Ok(self
                .index
                .active_rules_on(on_date)
                .into_iter()
                .cloned()
                .collect())
        }

        async fn get_prices(
            &self,
            apart_id: ApartId,
            product_id: ProductId,
            season: SeasonCode,
            on_date: NaiveDate,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Price>, PortError> {
            Ok(self
                .index
                .prices_for(apart_id, product_id, &season, on_date)
                .into_iter()
                .cloned()
                .collect())
        }

        async fn get_tax_types(
            &self,
            ids: Vec<TaxTypeId>,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<TaxType>, PortError> {
            Ok(self.index.tax_types(&ids).into_iter().cloned().collect())
        }
    }
}
