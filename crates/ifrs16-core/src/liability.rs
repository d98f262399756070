//! Initial lease-liability present value and right-of-use asset measurement.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::inputs::LeaseTerms;
use crate::rates::periodic_rate;
use crate::types::{Money, PaymentTiming, Rate, Years};

/// Number of payment periods over an effective term.
///
/// Midpoints round away from zero: a 2.5-year annual lease has 3 payment
/// periods, not the 2 that half-to-even rounding would give.
pub fn total_periods(effective_years: Years, periods_per_year: u32) -> u32 {
    let n = (effective_years * Decimal::from(periods_per_year))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if n <= Decimal::ZERO {
        return 0;
    }
    n.to_u32().unwrap_or(0)
}

/// Residual value guarantee amount, counted only when payment is
/// reasonably certain.
pub(crate) fn rvg_addon(terms: &LeaseTerms) -> Money {
    terms
        .residual_value_guarantee
        .as_ref()
        .filter(|g| g.reasonably_certain)
        .map(|g| g.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Whether the first period's cash was settled via a pre-commencement
/// prepayment (only meaningful for in-advance payment schedules).
pub(crate) fn prepaid_advance(terms: &LeaseTerms) -> bool {
    terms.timing == PaymentTiming::Advance && terms.prepayments > Decimal::ZERO
}

/// Initial lease liability: discounted value of the contractual payment
/// stream, adjusted for any financing component embedded in an
/// above/below-market sale arrangement.
pub fn initial_liability(terms: &LeaseTerms, effective_years: Years) -> Money {
    let periods_per_year = terms.frequency.periods_per_year();
    let periods = total_periods(effective_years, periods_per_year);
    let rate = periodic_rate(terms.annual_rate, periods_per_year);

    let pv = pv_of_lease_payments(
        terms.fixed_payment,
        rvg_addon(terms),
        rate,
        periods,
        terms.timing,
        prepaid_advance(terms),
    );

    // Sale proceeds above or below fair value embed a financing component
    // that adjusts the liability directly.
    let adjustment = match (terms.sale_proceeds, terms.fair_value) {
        (Some(proceeds), Some(fair_value)) if proceeds != fair_value => proceeds - fair_value,
        _ => Decimal::ZERO,
    };

    (pv + adjustment).round_dp(2)
}

/// PV of `periods` level payments at `rate`, with `final_addon` included in
/// the last period's payment.
///
/// Advance timing discounts as an annuity-due (exponent `i − 1`). When the
/// first period was settled via a pre-commencement prepayment the sum
/// starts at period 2.
pub(crate) fn pv_of_lease_payments(
    payment: Money,
    final_addon: Money,
    rate: Rate,
    periods: u32,
    timing: PaymentTiming,
    skip_first: bool,
) -> Money {
    if periods == 0 {
        return Decimal::ZERO;
    }
    let offset: u32 = match timing {
        PaymentTiming::Advance => 1,
        PaymentTiming::Arrears => 0,
    };
    let start: u32 = if skip_first { 2 } else { 1 };
    let one_plus_r = Decimal::ONE + rate;

    let mut pv = Decimal::ZERO;
    for i in start..=periods {
        let cash = if i == periods {
            payment + final_addon
        } else {
            payment
        };
        let mut discount = Decimal::ONE;
        for _ in 0..(i - offset) {
            discount *= one_plus_r;
        }
        if !discount.is_zero() {
            pv += cash / discount;
        }
    }
    pv
}

/// Initial right-of-use asset.
///
/// When both a fair value and a carrying amount are on file, the ROU is a
/// proportional allocation of the carrying amount and the additive cost
/// formula is superseded entirely.
pub fn initial_rou_asset(terms: &LeaseTerms, liability: Money) -> Money {
    let rou = match (terms.fair_value, terms.carrying_amount) {
        (Some(fair_value), Some(carrying))
            if fair_value > Decimal::ZERO && carrying > Decimal::ZERO =>
        {
            liability / fair_value * carrying
        }
        _ => liability + terms.initial_direct_costs + terms.prepayments - terms.incentives,
    };
    rou.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ResidualValueGuarantee;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    /// Helper: 5-year annual lease, $100k in arrears at 5%
    fn annual_lease() -> LeaseTerms {
        LeaseTerms {
            description: "Office lease".to_string(),
            commencement: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fixed_payment: dec!(100000),
            frequency: crate::types::PaymentFrequency::Annual,
            timing: PaymentTiming::Arrears,
            annual_rate: dec!(0.05),
            non_cancellable_years: dec!(5),
            renewal: None,
            termination: None,
            initial_direct_costs: Decimal::ZERO,
            prepayments: Decimal::ZERO,
            incentives: Decimal::ZERO,
            residual_value_guarantee: None,
            fair_value: None,
            carrying_amount: None,
            sale_proceeds: None,
            has_modification: false,
            modification: None,
            currency: Default::default(),
            extra_fields: None,
        }
    }

    // -----------------------------------------------------------------------
    // 1. Ordinary annuity PV
    // -----------------------------------------------------------------------
    #[test]
    fn test_ordinary_annuity_pv() {
        let terms = annual_lease();
        let liability = initial_liability(&terms, dec!(5));
        // 100,000/yr for 5 years at 5% in arrears
        assert_eq!(liability, dec!(432947.67));
    }

    // -----------------------------------------------------------------------
    // 2. Zero rate degrades to an undiscounted sum
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_is_undiscounted_sum() {
        let mut terms = annual_lease();
        terms.annual_rate = Decimal::ZERO;
        let liability = initial_liability(&terms, dec!(5));
        assert_eq!(liability, dec!(500000));
    }

    // -----------------------------------------------------------------------
    // 3. Zero payment and zero periods produce zero, never an error
    // -----------------------------------------------------------------------
    #[test]
    fn test_degenerate_inputs_produce_zero() {
        let mut terms = annual_lease();
        terms.fixed_payment = Decimal::ZERO;
        assert_eq!(initial_liability(&terms, dec!(5)), Decimal::ZERO);

        let terms = annual_lease();
        assert_eq!(initial_liability(&terms, Decimal::ZERO), Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 4. Advance timing is worth strictly more than arrears
    // -----------------------------------------------------------------------
    #[test]
    fn test_advance_exceeds_arrears() {
        let arrears = initial_liability(&annual_lease(), dec!(5));

        let mut terms = annual_lease();
        terms.timing = PaymentTiming::Advance;
        let advance = initial_liability(&terms, dec!(5));

        assert!(advance > arrears);
    }

    // -----------------------------------------------------------------------
    // 5. Advance with a prepayment excludes the first period from the PV
    // -----------------------------------------------------------------------
    #[test]
    fn test_advance_prepayment_skips_first_period() {
        let mut terms = annual_lease();
        terms.timing = PaymentTiming::Advance;
        terms.prepayments = dec!(50000);
        let liability = initial_liability(&terms, dec!(5));
        // Periods 2..=5 discounted at exponents 1..=4
        assert_eq!(liability, dec!(354595.05));
    }

    // -----------------------------------------------------------------------
    // 6. Residual value guarantee lands in the final period only
    // -----------------------------------------------------------------------
    #[test]
    fn test_rvg_discounted_in_final_period() {
        let mut terms = annual_lease();
        terms.non_cancellable_years = dec!(2);
        terms.residual_value_guarantee = Some(ResidualValueGuarantee {
            amount: dec!(10000),
            reasonably_certain: true,
        });
        let with_rvg = initial_liability(&terms, dec!(2));

        terms.residual_value_guarantee = None;
        let without_rvg = initial_liability(&terms, dec!(2));

        // Difference is the RVG discounted two periods, up to rounding
        let expected = dec!(10000) / (dec!(1.05) * dec!(1.05));
        assert!((with_rvg - without_rvg - expected).abs() < dec!(0.01));
    }

    #[test]
    fn test_rvg_ignored_when_not_reasonably_certain() {
        let mut terms = annual_lease();
        terms.residual_value_guarantee = Some(ResidualValueGuarantee {
            amount: dec!(10000),
            reasonably_certain: false,
        });
        assert_eq!(initial_liability(&terms, dec!(5)), dec!(432947.67));
    }

    // -----------------------------------------------------------------------
    // 7. Sale-proceeds adjustment in both directions
    // -----------------------------------------------------------------------
    #[test]
    fn test_sale_proceeds_above_fair_value_increase_liability() {
        let mut terms = annual_lease();
        terms.fair_value = Some(dec!(100000));
        terms.sale_proceeds = Some(dec!(110000));
        assert_eq!(initial_liability(&terms, dec!(5)), dec!(442947.67));
    }

    #[test]
    fn test_sale_proceeds_below_fair_value_decrease_liability() {
        let mut terms = annual_lease();
        terms.fair_value = Some(dec!(100000));
        terms.sale_proceeds = Some(dec!(90000));
        assert_eq!(initial_liability(&terms, dec!(5)), dec!(422947.67));
    }

    // -----------------------------------------------------------------------
    // 8. ROU asset: additive formula and allocation override
    // -----------------------------------------------------------------------
    #[test]
    fn test_rou_additive_identity() {
        let mut terms = annual_lease();
        terms.initial_direct_costs = dec!(1000);
        terms.prepayments = dec!(2000);
        terms.incentives = dec!(500);
        let liability = dec!(432947.67);
        assert_eq!(
            initial_rou_asset(&terms, liability),
            liability + dec!(1000) + dec!(2000) - dec!(500)
        );
    }

    #[test]
    fn test_rou_allocation_override() {
        let mut terms = annual_lease();
        terms.initial_direct_costs = dec!(1000);
        terms.fair_value = Some(dec!(500000));
        terms.carrying_amount = Some(dec!(400000));
        let liability = dec!(432947.67);
        // liability / fv * ca supersedes the additive formula entirely
        let expected = (liability / dec!(500000) * dec!(400000)).round_dp(2);
        assert_eq!(initial_rou_asset(&terms, liability), expected);
    }

    #[test]
    fn test_total_periods_rounding() {
        assert_eq!(total_periods(dec!(5), 12), 60);
        assert_eq!(total_periods(dec!(2.5), 4), 10);
        assert_eq!(total_periods(Decimal::ZERO, 12), 0);
    }

    #[test]
    fn test_half_period_terms_round_up() {
        // Half-year effective terms are reachable through fractional
        // termination points; the extra half period must not be dropped
        assert_eq!(total_periods(dec!(2.5), 1), 3);
        assert_eq!(total_periods(dec!(6.5), 1), 7);
        assert_eq!(total_periods(dec!(2.25), 2), 5);
    }
}
