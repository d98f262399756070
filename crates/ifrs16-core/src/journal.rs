//! Journal entry synthesis for initial recognition and the first period.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::schedule::AmortizationRow;
use crate::types::{Currency, Money};
use crate::LeaseResult;

/// One double-entry line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub account: String,
    pub debit: Money,
    pub credit: Money,
    pub memo: String,
    pub currency: Currency,
}

impl JournalEntry {
    fn debit(
        date: NaiveDate,
        account: &str,
        amount: Money,
        memo: &str,
        currency: &Currency,
    ) -> Self {
        JournalEntry {
            date,
            account: account.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
            memo: memo.to_string(),
            currency: currency.clone(),
        }
    }

    fn credit(
        date: NaiveDate,
        account: &str,
        amount: Money,
        memo: &str,
        currency: &Currency,
    ) -> Self {
        JournalEntry {
            date,
            account: account.to_string(),
            debit: Decimal::ZERO,
            credit: amount,
            memo: memo.to_string(),
            currency: currency.clone(),
        }
    }
}

/// Initial recognition plus a representative first-period posting set.
///
/// Only the first amortization period is materialized; callers that need a
/// full ledger iterate the amortization schedule and apply the same entry
/// shape period by period.
pub fn synthesize_entries(
    commencement: NaiveDate,
    initial_liability: Money,
    initial_rou: Money,
    first_period: Option<&AmortizationRow>,
    currency: &Currency,
) -> LeaseResult<Vec<JournalEntry>> {
    let mut entries = vec![
        JournalEntry::debit(
            commencement,
            "Right-of-use asset",
            initial_rou,
            "Initial recognition of right-of-use asset",
            currency,
        ),
        JournalEntry::credit(
            commencement,
            "Lease liability",
            initial_liability,
            "Initial recognition of lease liability",
            currency,
        ),
    ];

    if let Some(row) = first_period {
        let first_period_date = commencement
            .checked_add_months(Months::new(1))
            .ok_or_else(|| LeaseError::DateError("first period date overflow".into()))?;

        entries.push(JournalEntry::debit(
            first_period_date,
            "Interest expense",
            row.interest,
            "Interest on lease liability, period 1",
            currency,
        ));
        entries.push(JournalEntry::debit(
            first_period_date,
            "Lease liability",
            row.principal,
            "Principal reduction, period 1",
            currency,
        ));
        entries.push(JournalEntry::credit(
            first_period_date,
            "Cash",
            row.payment,
            "Lease payment, period 1",
            currency,
        ));
        entries.push(JournalEntry::debit(
            first_period_date,
            "Depreciation expense",
            row.depreciation,
            "Depreciation of right-of-use asset, period 1",
            currency,
        ));
        entries.push(JournalEntry::credit(
            first_period_date,
            "Accumulated depreciation",
            row.depreciation,
            "Depreciation of right-of-use asset, period 1",
            currency,
        ));
    }

    Ok(entries)
}
