//! Effective lease-term resolution from the non-cancellable term and options.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inputs::LeaseTerms;
use crate::types::Years;

/// "Reasonably certain" likelihood threshold for option exercise.
const REASONABLY_CERTAIN: Decimal = dec!(0.5);

/// Resolved lease term with its raw components for disclosure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTerm {
    /// Effective term in years used for measurement
    pub effective_years: Years,
    pub non_cancellable_years: Years,
    /// Renewal years as contracted (whether or not included in the term)
    pub renewal_years: Years,
    /// Termination exercise point as parsed (whether or not it governs)
    pub termination_years: Years,
}

/// Resolve the effective lease term.
///
/// Priority order, mutually exclusive:
/// 1. a reasonably certain termination option layers its exercise point on
///    top of the non-cancellable period and suppresses any renewal — a
///    certain early exit supersedes a hypothetical extension;
/// 2. otherwise a reasonably certain renewal extends the term;
/// 3. otherwise the non-cancellable term stands alone.
pub fn resolve_lease_term(terms: &LeaseTerms) -> ResolvedTerm {
    let termination_years = terms
        .termination
        .as_ref()
        .map(|t| t.exercise_point_years())
        .unwrap_or(Decimal::ZERO);
    let termination_likelihood = terms
        .termination
        .as_ref()
        .map(|t| t.likelihood)
        .unwrap_or(Decimal::ZERO);
    let renewal_years = terms
        .renewal
        .as_ref()
        .map(|r| r.additional_years)
        .unwrap_or(Decimal::ZERO);
    let renewal_likelihood = terms
        .renewal
        .as_ref()
        .map(|r| r.likelihood)
        .unwrap_or(Decimal::ZERO);

    let non_cancellable = terms.non_cancellable_years;

    let effective_years =
        if termination_years > Decimal::ZERO && termination_likelihood >= REASONABLY_CERTAIN {
            // The exercise point is expressed relative to commencement in the
            // source data, so it layers on top of the non-cancellable period.
            non_cancellable + termination_years
        } else if renewal_years > Decimal::ZERO && renewal_likelihood >= REASONABLY_CERTAIN {
            non_cancellable + renewal_years
        } else {
            non_cancellable
        };

    ResolvedTerm {
        effective_years,
        non_cancellable_years: non_cancellable,
        renewal_years,
        termination_years,
    }
}
