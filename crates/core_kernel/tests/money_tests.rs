//! Integration tests for money types

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, MoneyError, Rate};

#[test]
fn test_round_to_currency() {
    let m = Money::new(dec!(100.4567), Currency::TRY);
    assert_eq!(m.round_to_currency().amount(), dec!(100.46));
}

#[test]
fn test_bankers_rounding_half_to_even() {
    let m = Money::new(dec!(2.125), Currency::TRY);
    assert_eq!(m.round_bankers(2).amount(), dec!(2.12));

    let m = Money::new(dec!(2.135), Currency::TRY);
    assert_eq!(m.round_bankers(2).amount(), dec!(2.14));
}

#[test]
fn test_divide_by_zero_is_error() {
    let m = Money::new(dec!(100), Currency::TRY);
    assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
}

#[test]
fn test_rate_round_trip() {
    let rate = Rate::from_percentage(dec!(18));
    assert_eq!(rate.as_decimal(), dec!(0.18));
    assert_eq!(rate.as_percentage(), dec!(18));
}

#[test]
fn test_display_uses_symbol() {
    let m = Money::new(dec!(1062.00), Currency::TRY);
    assert_eq!(m.to_string(), "₺ 1062.00");
}

#[test]
fn test_partial_ord_across_currencies_is_none() {
    let a = Money::new(dec!(1), Currency::TRY);
    let b = Money::new(dec!(1), Currency::USD);
    assert_eq!(a.partial_cmp(&b), None);
}
