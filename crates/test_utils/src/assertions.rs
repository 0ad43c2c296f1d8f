//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types with more meaningful
//! failure messages than the standard macros.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use core_kernel::Money;
use domain_billing::FinancialSummary;
use domain_pricing::ResolvedPrice;

/// Asserts that two Money values are equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies differ or the amounts differ by more than
/// `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={:?}, expected={:?}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ beyond tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "Expected positive money, got {money}");
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {money}");
}

/// Asserts the arithmetic invariants of a financial summary
///
/// paid ≤ total, remaining = total − paid, progress within 0..=100 and
/// consistent with the amounts at the boundaries.
pub fn assert_summary_consistent(summary: &FinancialSummary) {
    assert!(
        summary.paid_amount.amount() <= summary.total_amount.amount(),
        "Paid {} exceeds total {}",
        summary.paid_amount,
        summary.total_amount
    );
    assert!(
        !summary.remaining_amount.is_negative(),
        "Negative remaining amount {}",
        summary.remaining_amount
    );
    assert_eq!(
        summary.total_amount.amount(),
        summary.paid_amount.amount() + summary.remaining_amount.amount(),
        "total != paid + remaining"
    );
    assert!(summary.payment_progress <= 100, "Progress above 100");
    if summary.total_amount.is_zero() {
        assert_eq!(summary.payment_progress, 0, "Empty plan must report 0%");
    } else if summary.remaining_amount.is_zero() {
        assert_eq!(summary.payment_progress, 100, "Fully paid must report 100%");
    }
}

/// Asserts that a quote's tax breakdown reconstructs its gross
pub fn assert_quote_consistent(quote: &ResolvedPrice) {
    assert!(
        quote.net.amount() <= quote.base.amount(),
        "Net {} exceeds base {}",
        quote.net,
        quote.base
    );
    let rebuilt = quote
        .tax
        .steps
        .iter()
        .fold(quote.net, |acc, step| acc + step.tax_amount);
    assert_eq!(
        rebuilt, quote.gross,
        "Tax steps do not reconstruct the gross"
    );
}

/// Asserts that a value survives a JSON round trip unchanged
pub fn assert_json_round_trip<T>(value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let json = serde_json::to_string(value).expect("serialization failed");
    let back: T = serde_json::from_str(&json).expect("deserialization failed");
    assert_eq!(&back, value, "Value changed across JSON round trip");
}
