//! Compounding primitives shared by the projection engines.

use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::types::{Money, Rate};
use crate::FinanceResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
///
/// An overflowing compound factor is reported as a non-convergence error on
/// `field` rather than panicking, so absurd rates surface as `InvalidInput`.
pub fn compound(rate: Rate, periods: u32, field: &str) -> FinanceResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinanceError::InvalidInput {
                field: field.into(),
                reason: format!("compound factor (1 + {rate})^{periods} does not converge"),
            })?;
    }
    Ok(result)
}

/// Future value of an annuity-due: pmt * [((1+i)^n - 1) / i] * (1+i).
///
/// Payments land at the start of each period, so every payment earns growth
/// for the period in which it is made. The zero-rate limit is pmt * n.
pub fn fv_annuity_due(pmt: Money, rate: Rate, periods: u32, field: &str) -> FinanceResult<Money> {
    if rate.is_zero() {
        return Ok(pmt * Decimal::from(periods));
    }
    let growth = compound(rate, periods, field)?;
    Ok(pmt * ((growth - Decimal::ONE) / rate) * (Decimal::ONE + rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_basic() {
        // 1.1^3 = 1.331
        assert_eq!(compound(dec!(0.10), 3, "rate").unwrap(), dec!(1.331));
    }

    #[test]
    fn test_compound_zero_periods() {
        assert_eq!(compound(dec!(0.25), 0, "rate").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        let result = compound(dec!(1000000), 1200, "annual_rate");
        assert!(matches!(
            result,
            Err(FinanceError::InvalidInput { ref field, .. }) if field == "annual_rate"
        ));
    }

    #[test]
    fn test_fv_annuity_due_zero_rate() {
        // No growth: 120 payments of 1000 = 120,000 exactly
        let fv = fv_annuity_due(dec!(1000), Decimal::ZERO, 120, "rate").unwrap();
        assert_eq!(fv, dec!(120000));
    }

    #[test]
    fn test_fv_annuity_due_exceeds_ordinary_annuity() {
        // Start-of-period payments earn one extra period of growth
        let rate = dec!(0.01);
        let due = fv_annuity_due(dec!(1000), rate, 12, "rate").unwrap();
        let ordinary = dec!(1000) * ((compound(rate, 12, "rate").unwrap() - Decimal::ONE) / rate);
        assert_eq!(due, ordinary * (Decimal::ONE + rate));
        assert!(due > ordinary);
    }
}
