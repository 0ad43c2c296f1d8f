//! Price resolution
//!
//! `PriceResolver` turns a quote request into a fully itemized
//! [`ResolvedPrice`]: exactly one price row is selected for the
//! (apartment, product, season) tuple on the date, the winning discount (if
//! any) is subtracted, and the row's tax cascade runs on the net.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{ApartId, Money, PriceId, ProductId};
use domain_catalog::{CatalogIndex, DiscountRule, Price, SeasonCode, TaxType};

use crate::cascade::{TaxCascade, TaxedAmount};
use crate::error::PricingError;
use crate::resolver::{DiscountContext, DiscountResolver, SelectedDiscount};

/// What the caller wants priced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Apartment
    pub apart_id: ApartId,
    /// Product
    pub product_id: ProductId,
    /// Season
    pub season: SeasonCode,
    /// Effective date of the quote
    pub on_date: NaiveDate,
    /// Stay length in nights
    pub nights: u32,
}

/// A fully itemized quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Price row the quote came from
    pub price_id: PriceId,
    /// Base price before discount
    pub base: Money,
    /// Winning discount, if any rule applied
    pub discount: Option<SelectedDiscount>,
    /// Base minus discount, floored at zero
    pub net: Money,
    /// Tax cascade over the net
    pub tax: TaxedAmount,
    /// Final amount owed
    pub gross: Money,
}

/// Resolves quote requests against catalog data
#[derive(Debug, Default)]
pub struct PriceResolver {
    discounts: DiscountResolver,
    cascade: TaxCascade,
}

impl PriceResolver {
    pub fn new() -> Self {
        Self {
            discounts: DiscountResolver::new(),
            cascade: TaxCascade::new(),
        }
    }

    /// Picks the single usable price row out of the in-effect matches
    ///
    /// # Errors
    ///
    /// - `PriceNotFound` when no row covers the tuple on the date
    /// - `OverlappingPrices` when more than one does
    pub fn select_row<'a>(
        &self,
        request: &QuoteRequest,
        rows: &[&'a Price],
    ) -> Result<&'a Price, PricingError> {
        match rows {
            [] => Err(PricingError::PriceNotFound {
                apart_id: request.apart_id,
                product_id: request.product_id,
                season: request.season.clone(),
                on_date: request.on_date,
            }),
            [row] => Ok(row),
            _ => Err(PricingError::OverlappingPrices {
                count: rows.len(),
                apart_id: request.apart_id,
                product_id: request.product_id,
                season: request.season.clone(),
                on_date: request.on_date,
            }),
        }
    }

    /// Itemizes a quote from an already-selected price row
    ///
    /// The caller supplies the discount rules active on the date and the tax
    /// types attached to the row. Pure: the same inputs always produce the
    /// same quote.
    pub fn quote(
        &self,
        request: &QuoteRequest,
        row: &Price,
        category_id: core_kernel::ProductCategoryId,
        rules: &[DiscountRule],
        taxes: &[TaxType],
    ) -> ResolvedPrice {
        let base = row.amount.round_to_currency();

        let context = DiscountContext {
            product_id: request.product_id,
            product_category_id: category_id,
            price: base,
            nights: request.nights,
            on_date: request.on_date,
        };
        let discount = self.discounts.resolve(rules, &context);

        let net = match &discount {
            Some(selected) => (base - selected.amount).floor_at_zero(),
            None => base,
        };

        let tax = self.cascade.apply(net, taxes);
        let gross = tax.gross;

        debug!(
            price_id = %row.id,
            base = %base,
            net = %net,
            gross = %gross,
            discounted = discount.is_some(),
            "quote itemized"
        );

        ResolvedPrice {
            price_id: row.id,
            base,
            discount,
            net,
            tax,
            gross,
        }
    }

    /// Resolves a quote request against a catalog snapshot
    ///
    /// # Errors
    ///
    /// - `UnknownProduct` when the product is not in the catalog
    /// - `PriceNotFound` / `OverlappingPrices` from row selection
    #[instrument(skip(self, index), fields(apart_id = %request.apart_id, product_id = %request.product_id))]
    pub fn resolve(
        &self,
        index: &CatalogIndex,
        request: &QuoteRequest,
    ) -> Result<ResolvedPrice, PricingError> {
        let category_id = index
            .category_of(request.product_id)
            .ok_or(PricingError::UnknownProduct(request.product_id))?;

        let rows = index.prices_for(
            request.apart_id,
            request.product_id,
            &request.season,
            request.on_date,
        );
        let row = self.select_row(request, &rows)?;

        let rules: Vec<DiscountRule> = index
            .active_rules_on(request.on_date)
            .into_iter()
            .cloned()
            .collect();
        let taxes: Vec<TaxType> = index
            .tax_types(&row.tax_ids)
            .into_iter()
            .cloned()
            .collect();

        Ok(self.quote(request, row, category_id, &rules, &taxes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{
        Currency, DateRange, DiscountCategoryId, DiscountRuleId, ProductCategoryId, TaxTypeId,
    };
    use domain_catalog::{
        DiscountCategory, DiscountKind, Product, ProductCategory, RuleScope, TaxType,
    };
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn season_window() -> DateRange {
        DateRange::new(d(2025, 9, 1), d(2026, 1, 31)).unwrap()
    }

    fn request(apart_id: ApartId, product_id: ProductId) -> QuoteRequest {
        QuoteRequest {
            apart_id,
            product_id,
            season: SeasonCode::from("2025-FALL"),
            on_date: d(2025, 10, 1),
            nights: 30,
        }
    }

    #[test]
    fn test_no_rows_is_price_not_found() {
        let resolver = PriceResolver::new();
        let req = request(ApartId::new(), ProductId::new());

        let err = resolver.select_row(&req, &[]).unwrap_err();
        assert!(matches!(err, PricingError::PriceNotFound { .. }));
    }

    #[test]
    fn test_multiple_rows_is_overlap() {
        let resolver = PriceResolver::new();
        let apart = ApartId::new();
        let product = ProductId::new();
        let req = request(apart, product);

        let row = |amount| {
            Price::new(
                PriceId::new(),
                apart,
                product,
                SeasonCode::from("2025-FALL"),
                Money::new(amount, Currency::TRY),
                season_window(),
            )
            .unwrap()
        };
        let a = row(dec!(1000));
        let b = row(dec!(1100));

        let err = resolver.select_row(&req, &[&a, &b]).unwrap_err();
        assert!(matches!(
            err,
            PricingError::OverlappingPrices { count: 2, .. }
        ));
        assert!(err.is_price_not_found());
    }

    #[test]
    fn test_quote_without_discount_or_tax() {
        let resolver = PriceResolver::new();
        let apart = ApartId::new();
        let product = ProductId::new();
        let req = request(apart, product);

        let row = Price::new(
            PriceId::new(),
            apart,
            product,
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(1000), Currency::TRY),
            season_window(),
        )
        .unwrap();

        let quote = resolver.quote(&req, &row, ProductCategoryId::new(), &[], &[]);
        assert!(quote.discount.is_none());
        assert_eq!(quote.net.amount(), dec!(1000.00));
        assert_eq!(quote.gross.amount(), dec!(1000.00));
    }

    #[test]
    fn test_full_resolution_with_discount_and_vat() {
        // 1000 base, 10% product discount -> 900 net, 18% VAT -> 1062.00
        let category = ProductCategory::new(ProductCategoryId::new(), "Rooms");
        let product = Product::new(ProductId::new(), category.id, "Single room");
        let discount_category = DiscountCategory::new(DiscountCategoryId::new(), "Early bird");
        let apart = ApartId::new();

        let vat = TaxType::new(TaxTypeId::new(), "KDV", dec!(18), 1).unwrap();
        let price = Price::new(
            PriceId::new(),
            apart,
            product.id,
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(1000), Currency::TRY),
            season_window(),
        )
        .unwrap()
        .attach_tax(vat.id);

        let rule = DiscountRule::new(
            DiscountRuleId::new(),
            discount_category.id,
            RuleScope::Product {
                product_id: product.id,
            },
            season_window(),
            DiscountKind::Percentage(dec!(10)),
            1,
        )
        .unwrap();

        let index = CatalogIndex::builder()
            .category(category)
            .product(product.clone())
            .discount_category(discount_category)
            .rule(rule.clone())
            .tax(vat)
            .price(price.clone())
            .build()
            .unwrap();

        let resolver = PriceResolver::new();
        let quote = resolver.resolve(&index, &request(apart, product.id)).unwrap();

        assert_eq!(quote.price_id, price.id);
        assert_eq!(quote.base.amount(), dec!(1000.00));
        assert_eq!(quote.discount.as_ref().unwrap().rule_id, rule.id);
        assert_eq!(quote.net.amount(), dec!(900.00));
        assert_eq!(quote.tax.steps.len(), 1);
        assert_eq!(quote.gross.amount(), dec!(1062.00));
    }

    #[test]
    fn test_unknown_product() {
        let index = CatalogIndex::builder().build().unwrap();
        let resolver = PriceResolver::new();

        let err = resolver
            .resolve(&index, &request(ApartId::new(), ProductId::new()))
            .unwrap_err();
        assert!(matches!(err, PricingError::UnknownProduct(_)));
    }

    #[test]
    fn test_net_floors_at_zero() {
        let resolver = PriceResolver::new();
        let apart = ApartId::new();
        let product = ProductId::new();
        let req = request(apart, product);

        let row = Price::new(
            PriceId::new(),
            apart,
            product,
            SeasonCode::from("2025-FALL"),
            Money::new(dec!(100), Currency::TRY),
            season_window(),
        )
        .unwrap();

        let oversized = DiscountRule::new(
            DiscountRuleId::new(),
            DiscountCategoryId::new(),
            RuleScope::Global,
            season_window(),
            DiscountKind::Fixed(Money::new(dec!(100), Currency::TRY)),
            1,
        )
        .unwrap();

        let quote = resolver.quote(
            &req,
            &row,
            ProductCategoryId::new(),
            std::slice::from_ref(&oversized),
            &[],
        );
        assert_eq!(quote.net, Money::zero(Currency::TRY));
        assert_eq!(quote.gross, Money::zero(Currency::TRY));
    }
}
