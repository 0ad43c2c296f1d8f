//! Discount rule selection
//!
//! Given the rules active on a date and a quote context, exactly one rule wins
//! or none does. Selection is a total order over the eligible candidates:
//! specificity tier first (product > category > global), then priority
//! (higher wins), then rule id ascending as the final deterministic
//! tie-break. The same inputs always produce the same winner.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

use core_kernel::{DiscountRuleId, Money, ProductCategoryId, ProductId};
use domain_catalog::{DiscountKind, DiscountRule, Specificity};

/// The quote context a rule is matched against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountContext {
    /// Product being priced
    pub product_id: ProductId,
    /// Category of that product
    pub product_category_id: ProductCategoryId,
    /// Base price before discount
    pub price: Money,
    /// Stay length in nights
    pub nights: u32,
    /// Quote date
    pub on_date: NaiveDate,
}

/// The winning rule with its computed discount amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDiscount {
    /// Winning rule id
    pub rule_id: DiscountRuleId,
    /// Value of the rule
    pub kind: DiscountKind,
    /// Specificity tier the rule won at
    pub specificity: Specificity,
    /// Priority of the rule
    pub priority: u32,
    /// Discount amount against the context's base price, rounded to currency
    pub amount: Money,
}

/// Selects the single applicable discount rule for a quote context
#[derive(Debug, Default)]
pub struct DiscountResolver;

impl DiscountResolver {
    pub fn new() -> Self {
        Self
    }

    /// Returns the winning rule, or `None` for full price
    ///
    /// `None` is not an error: it means no active, in-scope, in-band rule
    /// exists for the context.
    pub fn resolve(
        &self,
        rules: &[DiscountRule],
        ctx: &DiscountContext,
    ) -> Option<SelectedDiscount> {
        let mut best: Option<&DiscountRule> = None;

        for rule in rules {
            if !rule.is_active_on(ctx.on_date) {
                continue;
            }
            if !rule.scope.covers(ctx.product_id, ctx.product_category_id) {
                continue;
            }
            if !rule.bands_admit(ctx.price, ctx.nights) {
                continue;
            }

            best = match best {
                None => Some(rule),
                Some(current) => match Self::rank(rule, current) {
                    Ordering::Greater => Some(rule),
                    Ordering::Equal => {
                        // Ids are unique upstream, so a full tie should not
                        // happen; resolved deterministically, logged for audit.
                        warn!(
                            rule_a = %current.id,
                            rule_b = %rule.id,
                            "ambiguous discount candidates tie on specificity, priority, and id"
                        );
                        Some(current)
                    }
                    Ordering::Less => Some(current),
                },
            };
        }

        best.map(|rule| SelectedDiscount {
            rule_id: rule.id,
            kind: rule.kind,
            specificity: rule.scope.specificity(),
            priority: rule.priority,
            amount: rule.kind.amount_against(ctx.price),
        })
    }

    /// Total order over eligible candidates; `Greater` means `a` beats `b`
    fn rank(a: &DiscountRule, b: &DiscountRule) -> Ordering {
        a.scope
            .specificity()
            .cmp(&b.scope.specificity())
            .then(a.priority.cmp(&b.priority))
            // lower id wins, so compare reversed
            .then(b.id.cmp(&a.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, DateRange, DiscountCategoryId};
    use domain_catalog::RuleScope;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window() -> DateRange {
        DateRange::new(d(2025, 1, 1), d(2025, 12, 31)).unwrap()
    }

    fn rule(scope: RuleScope, kind: DiscountKind, priority: u32) -> DiscountRule {
        DiscountRule::new(
            DiscountRuleId::new(),
            DiscountCategoryId::new(),
            scope,
            window(),
            kind,
            priority,
        )
        .unwrap()
    }

    fn ctx(product_id: ProductId, category_id: ProductCategoryId) -> DiscountContext {
        DiscountContext {
            product_id,
            product_category_id: category_id,
            price: Money::new(dec!(1000), Currency::TRY),
            nights: 30,
            on_date: d(2025, 6, 1),
        }
    }

    #[test]
    fn test_no_candidates_is_none() {
        let resolver = DiscountResolver::new();
        let context = ctx(ProductId::new(), ProductCategoryId::new());
        assert!(resolver.resolve(&[], &context).is_none());
    }

    #[test]
    fn test_specificity_beats_priority() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let product_rule = rule(
            RuleScope::Product { product_id },
            DiscountKind::Percentage(dec!(10)),
            5,
        );
        let global_rule = rule(
            RuleScope::Global,
            DiscountKind::Percentage(dec!(15)),
            10,
        );

        let resolver = DiscountResolver::new();
        let selected = resolver
            .resolve(&[global_rule, product_rule.clone()], &context)
            .unwrap();

        assert_eq!(selected.rule_id, product_rule.id);
        assert_eq!(selected.amount.amount(), dec!(100.00));
    }

    #[test]
    fn test_priority_breaks_same_tier() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let low = rule(RuleScope::Global, DiscountKind::Percentage(dec!(5)), 1);
        let high = rule(RuleScope::Global, DiscountKind::Percentage(dec!(8)), 9);

        let resolver = DiscountResolver::new();
        let selected = resolver.resolve(&[low, high.clone()], &context).unwrap();
        assert_eq!(selected.rule_id, high.id);
    }

    #[test]
    fn test_lowest_id_breaks_full_tie() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let a = rule(RuleScope::Global, DiscountKind::Percentage(dec!(5)), 3);
        let b = rule(RuleScope::Global, DiscountKind::Percentage(dec!(8)), 3);
        let expected = a.id.min(b.id);

        let resolver = DiscountResolver::new();
        let selected = resolver.resolve(&[a, b], &context).unwrap();
        assert_eq!(selected.rule_id, expected);
    }

    #[test]
    fn test_category_rule_requires_category_match() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let other_category = rule(
            RuleScope::Category {
                category_id: ProductCategoryId::new(),
            },
            DiscountKind::Percentage(dec!(20)),
            9,
        );
        let matching = rule(
            RuleScope::Category { category_id },
            DiscountKind::Percentage(dec!(10)),
            1,
        );

        let resolver = DiscountResolver::new();
        let selected = resolver
            .resolve(&[other_category, matching.clone()], &context)
            .unwrap();
        assert_eq!(selected.rule_id, matching.id);
    }

    #[test]
    fn test_bands_filter_candidates() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let too_expensive = rule(RuleScope::Global, DiscountKind::Percentage(dec!(50)), 9)
            .with_price_band(Some(Money::new(dec!(2000), Currency::TRY)), None)
            .unwrap();
        let short_stay_only = rule(RuleScope::Global, DiscountKind::Percentage(dec!(40)), 9)
            .with_nights_band(None, Some(7))
            .unwrap();
        let eligible = rule(RuleScope::Global, DiscountKind::Percentage(dec!(5)), 1);

        let resolver = DiscountResolver::new();
        let selected = resolver
            .resolve(&[too_expensive, short_stay_only, eligible.clone()], &context)
            .unwrap();
        assert_eq!(selected.rule_id, eligible.id);
    }

    #[test]
    fn test_fixed_discount_clamped() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let oversized = rule(
            RuleScope::Global,
            DiscountKind::Fixed(Money::new(dec!(5000), Currency::TRY)),
            1,
        );

        let resolver = DiscountResolver::new();
        let selected = resolver.resolve(&[oversized], &context).unwrap();
        assert_eq!(selected.amount, context.price);
    }

    #[test]
    fn test_resolution_is_pure() {
        let product_id = ProductId::new();
        let category_id = ProductCategoryId::new();
        let context = ctx(product_id, category_id);

        let rules = vec![
            rule(RuleScope::Product { product_id }, DiscountKind::Percentage(dec!(10)), 2),
            rule(RuleScope::Category { category_id }, DiscountKind::Percentage(dec!(12)), 7),
            rule(RuleScope::Global, DiscountKind::Percentage(dec!(15)), 9),
        ];

        let resolver = DiscountResolver::new();
        let first = resolver.resolve(&rules, &context);
        let second = resolver.resolve(&rules, &context);
        assert_eq!(first, second);
    }
}
