//! Lease modification: preserve history up to the modification date,
//! remeasure the remainder under the new terms, stitch one continuous
//! result.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::engine::CalculationResult;
use crate::inputs::{LeaseModification, LeaseTerms};
use crate::journal::synthesize_entries;
use crate::liability::{pv_of_lease_payments, total_periods};
use crate::rates::periodic_rate;
use crate::schedule::{
    build_amortization, build_cashflows_range, build_depreciation, AmortizationRow,
};
use crate::types::Money;
use crate::LeaseResult;

/// Whole calendar months from `start` to `end`; 0 if `end` precedes `start`.
fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let raw = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if raw < 0 {
        return 0;
    }
    let mut months = raw as u32;
    // Step back if the day-of-month has not been reached yet
    if let Some(advanced) = start.checked_add_months(Months::new(months)) {
        if advanced > end {
            months = months.saturating_sub(1);
        }
    }
    months
}

/// Split the original schedule at the modification date, remeasure the
/// remaining term, and return a stitched result.
///
/// Preserved periods are the historical record and are carried over
/// untouched; the forward leg is a fresh annuity remeasured with the
/// changed fields (unset fields fall back to the original terms). The ROU
/// carrying amount absorbs the liability delta per IFRS 16.44. Initial
/// balances and term fields in the returned result stay the originals.
pub fn remeasure(
    terms: &LeaseTerms,
    original: &CalculationResult,
    event: &LeaseModification,
) -> LeaseResult<CalculationResult> {
    let periods_per_year = terms.frequency.periods_per_year();
    let months_per_period = terms.frequency.months_per_period();

    let months_elapsed = whole_months_between(terms.commencement, event.effective_date);
    let total = original.amortization.len() as u32;
    let periods_elapsed = (months_elapsed / months_per_period).min(total);

    let preserved: Vec<AmortizationRow> = original
        .amortization
        .iter()
        .take(periods_elapsed as usize)
        .cloned()
        .collect();
    let mut cashflows: Vec<_> = original
        .cashflows
        .iter()
        .take(periods_elapsed as usize)
        .cloned()
        .collect();
    let mut depreciation: Vec<_> = original
        .depreciation
        .iter()
        .take(periods_elapsed as usize)
        .cloned()
        .collect();

    // Opening balances for remeasurement
    let (liability_at, rou_at) = match preserved.last() {
        Some(row) => (row.closing_liability, row.closing_rou),
        None => (original.initial_liability, original.initial_rou_asset),
    };

    let years_elapsed = Decimal::from(months_elapsed) / dec!(12);
    let mut remaining_years = original.lease_term_years - years_elapsed;
    if remaining_years < Decimal::ZERO {
        remaining_years = Decimal::ZERO;
    }
    let remaining_periods = total_periods(remaining_years, periods_per_year);

    // Changed fields override, everything else carries over
    let new_payment = event.changes.fixed_payment.unwrap_or(terms.fixed_payment);
    let new_annual_rate = event.changes.annual_rate.unwrap_or(terms.annual_rate);
    let new_timing = event.changes.timing.unwrap_or(terms.timing);
    let rate = periodic_rate(new_annual_rate, periods_per_year);

    let new_liability = pv_of_lease_payments(
        new_payment,
        Decimal::ZERO,
        rate,
        remaining_periods,
        new_timing,
        false,
    )
    .round_dp(2);
    // IFRS 16.44: the remeasurement delta adjusts the ROU carrying amount,
    // it is not expensed
    let new_rou = (rou_at + (new_liability - liability_at)).round_dp(2);

    let forward: Vec<AmortizationRow> = build_amortization(
        new_liability,
        new_rou,
        new_payment,
        Decimal::ZERO,
        rate,
        remaining_periods,
        false,
    )
    .into_iter()
    .map(|mut row| {
        row.period += periods_elapsed;
        row
    })
    .collect();

    if remaining_periods > 0 {
        let forward_cashflows = build_cashflows_range(
            terms.commencement,
            new_payment,
            Decimal::ZERO,
            periods_elapsed + 1,
            periods_elapsed + remaining_periods,
            months_per_period,
        )?;
        cashflows.extend(forward_cashflows);
    }

    depreciation.extend(build_depreciation(&forward));

    let mut amortization = preserved;
    amortization.extend(forward);

    let total_interest: Money = amortization.iter().map(|r| r.interest).sum();
    let total_depreciation: Money = amortization.iter().map(|r| r.depreciation).sum();

    let journal_entries = synthesize_entries(
        terms.commencement,
        original.initial_liability,
        original.initial_rou_asset,
        amortization.first(),
        &terms.currency,
    )?;

    Ok(CalculationResult {
        initial_liability: original.initial_liability,
        initial_rou_asset: original.initial_rou_asset,
        total_interest,
        total_depreciation,
        cashflows,
        amortization,
        depreciation,
        journal_entries,
        lease_term_years: original.lease_term_years,
        non_cancellable_years: original.non_cancellable_years,
        renewal_years: original.renewal_years,
        termination_years: original.termination_years,
    })
}
