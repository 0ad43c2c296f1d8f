//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{
    Currency, DiscountCategoryId, DiscountRuleId, Money, PaymentId, PlanEntryId, RegistrationId,
};
use domain_billing::{LedgerEntry, PaymentLedger, PaymentPlanEntry};
use domain_catalog::{DiscountKind, DiscountRule, RuleScope};

use crate::fixtures::TemporalFixtures;

/// Builds a payment plan by splitting a total across installments
///
/// The total is allocated exactly: installment amounts differ by at most one
/// minor unit and always sum back to the total.
pub struct PaymentPlanBuilder {
    registration_id: RegistrationId,
    total: Money,
    deposit: Option<Money>,
    installments: u32,
    first_due: NaiveDate,
    interval_days: u64,
}

impl Default for PaymentPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentPlanBuilder {
    pub fn new() -> Self {
        Self {
            registration_id: RegistrationId::new(),
            total: Money::new(dec!(1000), Currency::TRY),
            deposit: None,
            installments: 2,
            first_due: TemporalFixtures::semester_start(),
            interval_days: 30,
        }
    }

    pub fn with_registration_id(mut self, id: RegistrationId) -> Self {
        self.registration_id = id;
        self
    }

    /// Sets the amount split across the installments (deposit excluded)
    pub fn with_total(mut self, total: Money) -> Self {
        self.total = total;
        self
    }

    /// Adds an up-front deposit due on the first date
    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.deposit = Some(deposit);
        self
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.installments = count;
        self
    }

    pub fn with_first_due(mut self, date: NaiveDate) -> Self {
        self.first_due = date;
        self
    }

    pub fn with_interval_days(mut self, days: u64) -> Self {
        self.interval_days = days;
        self
    }

    /// Builds the plan entries
    ///
    /// # Panics
    ///
    /// Panics on invalid inputs (zero installments, non-positive amounts);
    /// builders are test-only code.
    pub fn build(self) -> Vec<PaymentPlanEntry> {
        let mut entries = Vec::new();
        let mut due = self.first_due;

        if let Some(deposit) = self.deposit {
            entries.push(
                PaymentPlanEntry::new(
                    PlanEntryId::new(),
                    self.registration_id,
                    due,
                    deposit,
                    true,
                )
                .unwrap(),
            );
            due = due + Days::new(self.interval_days);
        }

        let shares = self.total.allocate(self.installments).unwrap();
        for share in shares {
            entries.push(
                PaymentPlanEntry::new(PlanEntryId::new(), self.registration_id, due, share, false)
                    .unwrap(),
            );
            due = due + Days::new(self.interval_days);
        }

        entries
    }
}

/// Builds a payment ledger from (date, amount) pairs
pub struct LedgerBuilder {
    registration_id: RegistrationId,
    currency: Currency,
    payments: Vec<(NaiveDate, Decimal)>,
}

impl LedgerBuilder {
    pub fn new(registration_id: RegistrationId) -> Self {
        Self {
            registration_id,
            currency: Currency::TRY,
            payments: Vec::new(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_payment(mut self, date: NaiveDate, amount: Decimal) -> Self {
        self.payments.push((date, amount));
        self
    }

    /// Builds the ledger
    ///
    /// # Panics
    ///
    /// Panics on invalid payments; builders are test-only code.
    pub fn build(self) -> PaymentLedger {
        let mut ledger = PaymentLedger::new(self.registration_id, self.currency);
        for (date, amount) in self.payments {
            ledger
                .record(
                    LedgerEntry::payment(
                        PaymentId::new(),
                        self.registration_id,
                        date,
                        Money::new(amount, self.currency),
                    )
                    .unwrap(),
                )
                .unwrap();
        }
        ledger
    }
}

/// Builds discount rules with a valid default window and priority
pub struct DiscountRuleBuilder {
    scope: RuleScope,
    kind: DiscountKind,
    priority: u32,
    window: core_kernel::DateRange,
}

impl Default for DiscountRuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountRuleBuilder {
    pub fn new() -> Self {
        Self {
            scope: RuleScope::Global,
            kind: DiscountKind::Percentage(dec!(10)),
            priority: 1,
            window: TemporalFixtures::semester_window(),
        }
    }

    pub fn with_scope(mut self, scope: RuleScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_kind(mut self, kind: DiscountKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_window(mut self, window: core_kernel::DateRange) -> Self {
        self.window = window;
        self
    }

    /// Builds the rule
    ///
    /// # Panics
    ///
    /// Panics on invalid rule parameters; builders are test-only code.
    pub fn build(self) -> DiscountRule {
        DiscountRule::new(
            DiscountRuleId::new(),
            DiscountCategoryId::new(),
            self.scope,
            self.window,
            self.kind,
            self.priority,
        )
        .unwrap()
    }
}
