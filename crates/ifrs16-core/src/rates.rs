//! Discount-rate conversion between annual and per-period compounding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Rate;

const NEWTON_ITERATIONS: u32 = 30;
const NEWTON_TOLERANCE: Decimal = dec!(0.0000000000001);

/// Effective per-period rate for a given annual rate:
/// `(1 + annual)^(1/periods_per_year) − 1`.
///
/// Compounding conversion, not simple division — flat division would
/// misstate the per-period discount factor for non-annual compounding.
pub fn periodic_rate(annual_rate: Rate, periods_per_year: u32) -> Rate {
    if periods_per_year <= 1 {
        return annual_rate;
    }
    nth_root(Decimal::ONE + annual_rate, periods_per_year) - Decimal::ONE
}

/// Newton's method for the nth root of A.
/// x_{k+1} = ((n-1)*x_k + A / x_k^(n-1)) / n
fn nth_root(a: Decimal, n: u32) -> Decimal {
    if a <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if a == Decimal::ONE {
        return Decimal::ONE;
    }
    let n_dec = Decimal::from(n);
    let n_minus_1 = n_dec - Decimal::ONE;

    let mut x = a;
    // Better initial guess for values close to 1
    if a > dec!(0.5) && a < dec!(2.0) {
        x = Decimal::ONE + (a - Decimal::ONE) / n_dec;
    }

    for _ in 0..NEWTON_ITERATIONS {
        // Compute x^(n-1) iteratively
        let mut x_pow = Decimal::ONE;
        for _ in 0..(n - 1) {
            x_pow *= x;
        }
        if x_pow.is_zero() {
            break;
        }
        let x_new = (n_minus_1 * x + a / x_pow) / n_dec;
        if (x_new - x).abs() < NEWTON_TOLERANCE {
            return x_new;
        }
        x = x_new;
    }
    x
}
