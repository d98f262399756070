//! Calculation entry point and result assembly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::inputs::LeaseTerms;
use crate::journal::{synthesize_entries, JournalEntry};
use crate::liability::{
    initial_liability, initial_rou_asset, prepaid_advance, rvg_addon, total_periods,
};
use crate::modification::remeasure;
use crate::rates::periodic_rate;
use crate::schedule::{
    build_amortization, build_cashflows, build_depreciation, AmortizationRow, CashflowEntry,
    DepreciationRow,
};
use crate::term::resolve_lease_term;
use crate::types::{Money, Years};
use crate::LeaseResult;

/// Complete measurement output for one lease contract.
///
/// A value object: produced fresh by every `calculate` call and never
/// mutated afterwards. After a modification the initial balances and term
/// fields still describe the contract's history; only the schedules and
/// totals reflect the remeasurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub initial_liability: Money,
    pub initial_rou_asset: Money,
    pub total_interest: Money,
    pub total_depreciation: Money,
    pub cashflows: Vec<CashflowEntry>,
    pub amortization: Vec<AmortizationRow>,
    pub depreciation: Vec<DepreciationRow>,
    pub journal_entries: Vec<JournalEntry>,
    pub lease_term_years: Years,
    pub non_cancellable_years: Years,
    pub renewal_years: Years,
    pub termination_years: Years,
}

/// Measure a lease, or remeasure it when modification metadata is present.
///
/// The modification path requires `modification` to be populated whenever
/// `has_modification` is set; absence is a hard error, never a silent
/// fallback to the unmodified calculation.
pub fn calculate(terms: &LeaseTerms) -> LeaseResult<CalculationResult> {
    validate_terms(terms)?;

    if terms.has_modification {
        let event = terms.modification.as_ref().ok_or_else(|| {
            LeaseError::MissingModification(
                "has_modification is set but no modification event was supplied".into(),
            )
        })?;
        let original = measure(terms)?;
        return remeasure(terms, &original, event);
    }

    measure(terms)
}

/// Unmodified measurement over the resolved term.
pub(crate) fn measure(terms: &LeaseTerms) -> LeaseResult<CalculationResult> {
    let resolved = resolve_lease_term(terms);
    let periods_per_year = terms.frequency.periods_per_year();
    let periods = total_periods(resolved.effective_years, periods_per_year);
    let rate = periodic_rate(terms.annual_rate, periods_per_year);

    let liability = initial_liability(terms, resolved.effective_years);
    let rou = initial_rou_asset(terms, liability);
    let final_addon = rvg_addon(terms);

    let cashflows = build_cashflows(
        terms.commencement,
        terms.fixed_payment,
        final_addon,
        periods,
        terms.frequency.months_per_period(),
    )?;
    let amortization = build_amortization(
        liability,
        rou,
        terms.fixed_payment,
        final_addon,
        rate,
        periods,
        prepaid_advance(terms),
    );
    let depreciation = build_depreciation(&amortization);
    let journal_entries = synthesize_entries(
        terms.commencement,
        liability,
        rou,
        amortization.first(),
        &terms.currency,
    )?;

    let total_interest: Money = amortization.iter().map(|r| r.interest).sum();
    let total_depreciation: Money = amortization.iter().map(|r| r.depreciation).sum();

    Ok(CalculationResult {
        initial_liability: liability,
        initial_rou_asset: rou,
        total_interest,
        total_depreciation,
        cashflows,
        amortization,
        depreciation,
        journal_entries,
        lease_term_years: resolved.effective_years,
        non_cancellable_years: resolved.non_cancellable_years,
        renewal_years: resolved.renewal_years,
        termination_years: resolved.termination_years,
    })
}

fn validate_terms(terms: &LeaseTerms) -> LeaseResult<()> {
    if terms.fixed_payment < Decimal::ZERO {
        return Err(LeaseError::InvalidInput {
            field: "fixed_payment".into(),
            reason: "Payment cannot be negative".into(),
        });
    }
    if terms.annual_rate <= dec!(-1) {
        return Err(LeaseError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    if terms.non_cancellable_years < Decimal::ZERO {
        return Err(LeaseError::InvalidInput {
            field: "non_cancellable_years".into(),
            reason: "Non-cancellable term cannot be negative".into(),
        });
    }
    for (field, amount) in [
        ("initial_direct_costs", terms.initial_direct_costs),
        ("prepayments", terms.prepayments),
        ("incentives", terms.incentives),
    ] {
        if amount < Decimal::ZERO {
            return Err(LeaseError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative".into(),
            });
        }
    }
    let likelihoods = [
        terms.renewal.as_ref().map(|r| ("renewal.likelihood", r.likelihood)),
        terms
            .termination
            .as_ref()
            .map(|t| ("termination.likelihood", t.likelihood)),
    ];
    for (field, likelihood) in likelihoods.into_iter().flatten() {
        if likelihood < Decimal::ZERO || likelihood > Decimal::ONE {
            return Err(LeaseError::InvalidInput {
                field: field.into(),
                reason: "Likelihood must be between 0 and 1".into(),
            });
        }
    }
    Ok(())
}
