//! Append-only payment ledger
//!
//! Every movement of money is a signed entry: payments are positive,
//! reversals are negative and reference the entry they undo. Corrections
//! never mutate history; the net position is always reconstructible from
//! the entry stream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, PaymentId, RegistrationId};

use crate::error::BillingError;

/// One signed ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: PaymentId,
    /// Registration the money moved against
    pub registration_id: RegistrationId,
    /// Value date
    pub date: NaiveDate,
    /// Signed amount: positive for payments, negative for reversals
    pub amount: Money,
    /// For reversals, the entry being undone
    pub reverses: Option<PaymentId>,
}

impl LedgerEntry {
    /// Creates a payment entry
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidLedgerEntry` for a non-positive amount.
    pub fn payment(
        id: PaymentId,
        registration_id: RegistrationId,
        date: NaiveDate,
        amount: Money,
    ) -> Result<Self, BillingError> {
        if !amount.is_positive() {
            return Err(BillingError::InvalidLedgerEntry(format!(
                "payment amount must be positive, got {amount}"
            )));
        }

        Ok(Self {
            id,
            registration_id,
            date,
            amount,
            reverses: None,
        })
    }

    /// Creates a reversal entry undoing `original` in full
    pub fn reversal(id: PaymentId, original: &LedgerEntry, date: NaiveDate) -> Self {
        Self {
            id,
            registration_id: original.registration_id,
            date,
            amount: original.amount.multiply(rust_decimal::Decimal::NEGATIVE_ONE),
            reverses: Some(original.id),
        }
    }

    /// Returns true for positive, non-reversal entries
    pub fn is_payment(&self) -> bool {
        self.reverses.is_none() && self.amount.is_positive()
    }
}

/// The payment history of one registration
///
/// # Invariants
///
/// - Entries are append-only; recorded history is never modified
/// - All entries share the ledger currency
/// - Each entry is reversed at most once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLedger {
    registration_id: RegistrationId,
    currency: Currency,
    entries: Vec<LedgerEntry>,
}

impl PaymentLedger {
    /// Creates an empty ledger
    pub fn new(registration_id: RegistrationId, currency: Currency) -> Self {
        Self {
            registration_id,
            currency,
            entries: Vec::new(),
        }
    }

    pub fn registration_id(&self) -> RegistrationId {
        self.registration_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a payment entry
    ///
    /// # Errors
    ///
    /// - `RegistrationMismatch` if the entry belongs to another registration
    /// - `InvalidLedgerEntry` for a currency other than the ledger's, a
    ///   duplicate id, or a raw reversal (use [`PaymentLedger::reverse`])
    pub fn record(&mut self, entry: LedgerEntry) -> Result<(), BillingError> {
        if entry.registration_id != self.registration_id {
            return Err(BillingError::RegistrationMismatch {
                expected: self.registration_id,
                got: entry.registration_id,
            });
        }
        if entry.amount.currency() != self.currency {
            return Err(BillingError::InvalidLedgerEntry(format!(
                "ledger currency is {:?}, entry is {:?}",
                self.currency,
                entry.amount.currency()
            )));
        }
        if entry.reverses.is_some() {
            return Err(BillingError::InvalidLedgerEntry(
                "reversals must go through reverse()".to_string(),
            ));
        }
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(BillingError::InvalidLedgerEntry(format!(
                "duplicate entry id {}",
                entry.id
            )));
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Appends a reversal undoing an earlier payment in full
    ///
    /// # Errors
    ///
    /// - `UnknownPayment` if no entry has `original_id`
    /// - `AlreadyReversed` if the target was reversed before, or is itself
    ///   a reversal
    pub fn reverse(
        &mut self,
        original_id: PaymentId,
        reversal_id: PaymentId,
        date: NaiveDate,
    ) -> Result<(), BillingError> {
        let original = self
            .entries
            .iter()
            .find(|e| e.id == original_id)
            .ok_or(BillingError::UnknownPayment(original_id))?;

        if original.reverses.is_some() {
            return Err(BillingError::AlreadyReversed(original_id));
        }
        if self.entries.iter().any(|e| e.reverses == Some(original_id)) {
            return Err(BillingError::AlreadyReversed(original_id));
        }

        let reversal = LedgerEntry::reversal(reversal_id, original, date);
        self.entries.push(reversal);
        Ok(())
    }

    /// Net position: payments minus reversals
    ///
    /// May be negative only transiently while entries are still arriving;
    /// consumers floor it at zero before allocating.
    pub fn net_total(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::zero(self.currency), |acc, e| acc + e.amount)
    }

    /// Date of the most recent payment entry, ignoring reversals
    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.entries
            .iter()
            .filter(|e| e.is_payment())
            .map(|e| e.date)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn try_lira(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::TRY)
    }

    fn ledger_with(amounts: &[(rust_decimal::Decimal, NaiveDate)]) -> PaymentLedger {
        let registration = RegistrationId::new();
        let mut ledger = PaymentLedger::new(registration, Currency::TRY);
        for (amount, date) in amounts {
            ledger
                .record(
                    LedgerEntry::payment(PaymentId::new(), registration, *date, try_lira(*amount))
                        .unwrap(),
                )
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_net_total_sums_payments() {
        let ledger = ledger_with(&[(dec!(500), d(2025, 9, 1)), (dec!(200), d(2025, 10, 1))]);
        assert_eq!(ledger.net_total().amount(), dec!(700));
    }

    #[test]
    fn test_reversal_subtracts() {
        let mut ledger = ledger_with(&[(dec!(500), d(2025, 9, 1))]);
        let original_id = ledger.entries()[0].id;

        ledger
            .reverse(original_id, PaymentId::new(), d(2025, 9, 5))
            .unwrap();

        assert_eq!(ledger.net_total().amount(), dec!(0));
        assert_eq!(ledger.entries().len(), 2);
    }

    #[test]
    fn test_double_reversal_rejected() {
        let mut ledger = ledger_with(&[(dec!(500), d(2025, 9, 1))]);
        let original_id = ledger.entries()[0].id;

        ledger
            .reverse(original_id, PaymentId::new(), d(2025, 9, 5))
            .unwrap();
        let second = ledger.reverse(original_id, PaymentId::new(), d(2025, 9, 6));

        assert!(matches!(second, Err(BillingError::AlreadyReversed(_))));
    }

    #[test]
    fn test_reverse_unknown_payment() {
        let mut ledger = ledger_with(&[]);
        let result = ledger.reverse(PaymentId::new(), PaymentId::new(), d(2025, 9, 5));
        assert!(matches!(result, Err(BillingError::UnknownPayment(_))));
    }

    #[test]
    fn test_record_rejects_foreign_registration() {
        let mut ledger = PaymentLedger::new(RegistrationId::new(), Currency::TRY);
        let foreign = LedgerEntry::payment(
            PaymentId::new(),
            RegistrationId::new(),
            d(2025, 9, 1),
            try_lira(dec!(100)),
        )
        .unwrap();

        assert!(matches!(
            ledger.record(foreign),
            Err(BillingError::RegistrationMismatch { .. })
        ));
    }

    #[test]
    fn test_record_rejects_currency_mismatch() {
        let registration = RegistrationId::new();
        let mut ledger = PaymentLedger::new(registration, Currency::TRY);
        let usd = LedgerEntry::payment(
            PaymentId::new(),
            registration,
            d(2025, 9, 1),
            Money::new(dec!(100), Currency::USD),
        )
        .unwrap();

        assert!(matches!(
            ledger.record(usd),
            Err(BillingError::InvalidLedgerEntry(_))
        ));
    }

    #[test]
    fn test_last_payment_date_ignores_reversals() {
        let mut ledger = ledger_with(&[(dec!(500), d(2025, 9, 1))]);
        let original_id = ledger.entries()[0].id;
        // reversal dated later than any payment
        ledger
            .reverse(original_id, PaymentId::new(), d(2025, 12, 1))
            .unwrap();

        assert_eq!(ledger.last_payment_date(), Some(d(2025, 9, 1)));
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = ledger_with(&[]);
        assert!(ledger.is_empty());
        assert_eq!(ledger.net_total().amount(), dec!(0));
        assert_eq!(ledger.last_payment_date(), None);
    }
}
