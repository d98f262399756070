//! Cashflow, amortization, and depreciation schedules over the resolved term.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

/// One contractual cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowEntry {
    /// Period number (1-indexed)
    pub period: u32,
    pub date: NaiveDate,
    pub amount: Money,
}

/// A single row in the lease-liability roll-forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period number (1-indexed)
    pub period: u32,
    /// Liability at start of period
    pub opening_liability: Money,
    /// Cash settled against the liability this period
    pub payment: Money,
    /// Interest accrued on the opening balance
    pub interest: Money,
    /// Principal reduction (payment − interest)
    pub principal: Money,
    /// Liability at end of period
    pub closing_liability: Money,
    /// Straight-line depreciation charge for the period
    pub depreciation: Money,
    /// ROU asset balance at end of period
    pub closing_rou: Money,
    /// Portion of the closing liability due within the next period
    pub current_liability: Money,
    /// Portion of the closing liability due beyond the next period
    pub non_current_liability: Money,
}

/// A single straight-line depreciation charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRow {
    pub period: u32,
    pub charge: Money,
    pub closing_rou: Money,
}

/// Build the contractual cashflow schedule from commencement.
pub fn build_cashflows(
    commencement: NaiveDate,
    payment: Money,
    final_addon: Money,
    periods: u32,
    months_per_period: u32,
) -> LeaseResult<Vec<CashflowEntry>> {
    build_cashflows_range(commencement, payment, final_addon, 1, periods, months_per_period)
}

/// Build cashflow entries for periods `first..=last`, dated relative to
/// commencement. Used directly for the forward leg of a modification so
/// stitched schedules keep one continuous calendar.
pub(crate) fn build_cashflows_range(
    commencement: NaiveDate,
    payment: Money,
    final_addon: Money,
    first: u32,
    last: u32,
    months_per_period: u32,
) -> LeaseResult<Vec<CashflowEntry>> {
    let mut entries = Vec::new();
    for period in first..=last {
        let date = commencement
            .checked_add_months(Months::new((period - 1) * months_per_period))
            .ok_or_else(|| {
                LeaseError::DateError(format!("cashflow date overflow at period {period}"))
            })?;
        let amount = if period == last {
            payment + final_addon
        } else {
            payment
        };
        entries.push(CashflowEntry {
            period,
            date,
            amount,
        });
    }
    Ok(entries)
}

/// Build the liability roll-forward with straight-line ROU depreciation.
///
/// Under the advance-with-prepayment regime the cash for period 1 was paid
/// before commencement, so amortization period i settles cashflow period
/// i+1: the nominal final period carries no payment and the second-to-last
/// absorbs the final-period add-on.
///
/// The final period's depreciation charge absorbs the per-period rounding
/// residual so the ROU asset closes at exactly zero.
pub fn build_amortization(
    initial_liability: Money,
    initial_rou: Money,
    payment: Money,
    final_addon: Money,
    rate: Rate,
    periods: u32,
    prepaid_advance: bool,
) -> Vec<AmortizationRow> {
    if periods == 0 {
        return Vec::new();
    }
    let per_period_depreciation = (initial_rou / Decimal::from(periods)).round_dp(2);

    let mut rows = Vec::with_capacity(periods as usize);
    let mut liability = initial_liability;
    let mut rou = initial_rou;

    for period in 1..=periods {
        let opening = liability;
        let interest = (opening * rate).round_dp(2);

        let cash = if prepaid_advance {
            if period == periods {
                Decimal::ZERO
            } else if period + 1 == periods {
                payment + final_addon
            } else {
                payment
            }
        } else if period == periods {
            payment + final_addon
        } else {
            payment
        };

        let principal = cash - interest;
        let mut closing = opening - principal;
        if closing < Decimal::ZERO {
            closing = Decimal::ZERO;
        }

        let charge = if period == periods {
            rou
        } else {
            per_period_depreciation
        };
        rou -= charge;
        if rou < Decimal::ZERO {
            rou = Decimal::ZERO;
        }

        rows.push(AmortizationRow {
            period,
            opening_liability: opening,
            payment: cash,
            interest,
            principal,
            closing_liability: closing,
            depreciation: charge,
            closing_rou: rou,
            current_liability: Decimal::ZERO,
            non_current_liability: Decimal::ZERO,
        });

        liability = closing;
    }

    split_liability(rows)
}

/// Fill in the current / non-current split for a freshly built schedule:
/// current(i) = closing(i) − closing(i+1), non-current(i) = closing(i+1);
/// the final period is entirely current. Produces a new sequence.
pub fn split_liability(rows: Vec<AmortizationRow>) -> Vec<AmortizationRow> {
    let closings: Vec<Money> = rows.iter().map(|r| r.closing_liability).collect();
    rows.into_iter()
        .enumerate()
        .map(|(idx, mut row)| {
            match closings.get(idx + 1) {
                Some(&next) => {
                    row.current_liability = row.closing_liability - next;
                    row.non_current_liability = next;
                }
                None => {
                    row.current_liability = row.closing_liability;
                    row.non_current_liability = Decimal::ZERO;
                }
            }
            row
        })
        .collect()
}

/// Straight-line depreciation schedule derived from the roll-forward.
pub fn build_depreciation(rows: &[AmortizationRow]) -> Vec<DepreciationRow> {
    rows.iter()
        .map(|r| DepreciationRow {
            period: r.period,
            charge: r.depreciation,
            closing_rou: r.closing_rou,
        })
        .collect()
}
