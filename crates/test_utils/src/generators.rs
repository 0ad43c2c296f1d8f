//! Property-Based Test Generators
//!
//! Proptest strategies generating random domain data that maintains
//! invariants (positive amounts, ordered windows, valid percentages).

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, DateRange, Money};

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::TRY),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
    ]
}

/// Strategy for strictly positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for positive TRY money
pub fn positive_try_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::TRY))
}

/// Strategy for positive money in any supported currency
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Strategy for valid tax/discount percentages (0, 100]
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (1u32..=10_000u32).prop_map(|basis_points| Decimal::new(basis_points as i64, 2))
}

/// Strategy for dates within the 2025-2026 academic year
pub fn academic_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..365u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Days::new(offset)
    })
}

/// Strategy for non-inverted date windows inside the academic year
pub fn window_strategy() -> impl Strategy<Value = DateRange> {
    (0u64..300u64, 1u64..65u64).prop_map(|(start_offset, len)| {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Days::new(start_offset);
        let end = start + chrono::Days::new(len);
        DateRange::new(start, end).unwrap()
    })
}
