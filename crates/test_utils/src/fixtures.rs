//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the dormitory finance
//! system. Fixtures are consistent and predictable for unit tests; random
//! variation belongs in `generators`.

use chrono::NaiveDate;
use fake::faker::address::en::StreetName;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::{
    Currency, DateRange, Money, PriceId, ProductCategoryId, ProductId, TaxTypeId,
};
use domain_catalog::{
    CatalogIndex, Price, Product, ProductCategory, SeasonCode, TaxType,
};

/// The season most fixtures price against
pub static FALL_SEASON: Lazy<SeasonCode> = Lazy::new(|| SeasonCode::from("2025-FALL"));

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard room price
    pub fn try_1000() -> Money {
        Money::new(dec!(1000.00), Currency::TRY)
    }

    /// Small amount for partial payments
    pub fn try_100() -> Money {
        Money::new(dec!(100.00), Currency::TRY)
    }

    /// Zero in the system currency
    pub fn try_zero() -> Money {
        Money::zero(Currency::TRY)
    }

    /// Foreign-currency amount for mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Default reconciliation tolerance (one kuruş)
    pub fn tolerance() -> Money {
        Money::new(dec!(0.01), Currency::TRY)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Fall semester start (Sep 1, 2025)
    pub fn semester_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    /// Fall semester end (Jan 31, 2026)
    pub fn semester_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }

    /// A date inside the semester for containment tests
    pub fn mid_semester() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    /// The full semester as a validity window
    pub fn semester_window() -> DateRange {
        DateRange::new(Self::semester_start(), Self::semester_end()).unwrap()
    }
}

/// Fixture for tax test data
pub struct TaxFixtures;

impl TaxFixtures {
    /// Turkish VAT at 18%, first in the cascade
    pub fn vat() -> TaxType {
        TaxType::new(TaxTypeId::new(), "KDV", dec!(18), 1).unwrap()
    }

    /// Lodging tax at 2%, second in the cascade
    pub fn lodging() -> TaxType {
        TaxType::new(TaxTypeId::new(), "KONAKLAMA", dec!(2), 2).unwrap()
    }
}

/// A minimal catalog: one apartment, one room product, VAT, one price row
pub struct CatalogFixture {
    pub index: CatalogIndex,
    pub apart_id: core_kernel::ApartId,
    pub product_id: ProductId,
    pub category_id: ProductCategoryId,
    pub price_id: PriceId,
    pub vat_id: TaxTypeId,
}

impl CatalogFixture {
    /// Builds the standard single-room catalog priced at 1000 TRY with VAT
    pub fn standard() -> Self {
        let category = ProductCategory::new(ProductCategoryId::new(), "Rooms");
        let apart_name: String = StreetName().fake();
        let product = Product::new(
            ProductId::new(),
            category.id,
            format!("Single room, {apart_name}"),
        );
        let apart_id = core_kernel::ApartId::new();
        let vat = TaxFixtures::vat();

        let price = Price::new(
            PriceId::new(),
            apart_id,
            product.id,
            FALL_SEASON.clone(),
            MoneyFixtures::try_1000(),
            TemporalFixtures::semester_window(),
        )
        .unwrap()
        .attach_tax(vat.id);

        let fixture_ids = (category.id, product.id, price.id, vat.id);
        let index = CatalogIndex::builder()
            .category(category)
            .product(product)
            .tax(vat)
            .price(price)
            .build()
            .unwrap();

        Self {
            index,
            apart_id,
            product_id: fixture_ids.1,
            category_id: fixture_ids.0,
            price_id: fixture_ids.2,
            vat_id: fixture_ids.3,
        }
    }

    /// Wraps the index in the in-memory port mock
    pub fn port(&self) -> domain_catalog::ports::mock::MockCatalogPort {
        domain_catalog::ports::mock::MockCatalogPort::new(self.index.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_builds() {
        let fixture = CatalogFixture::standard();
        assert!(fixture.index.product(fixture.product_id).is_some());

        let rows = fixture.index.prices_for(
            fixture.apart_id,
            fixture.product_id,
            &FALL_SEASON,
            TemporalFixtures::mid_semester(),
        );
        assert_eq!(rows.len(), 1);
    }
}
