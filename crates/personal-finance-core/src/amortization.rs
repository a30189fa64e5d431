use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::compound;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a fixed-rate loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Total loan amount before the down payment
    pub loan_amount: Money,
    /// Up-front down payment (reduces the financed principal)
    #[serde(default)]
    pub down_payment: Money,
    /// Annual interest rate as a decimal (0.085 = 8.5%)
    pub annual_rate: Rate,
    /// Loan term in years
    pub term_years: u32,
    /// How many leading years of the schedule to report (None = full term)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schedule_years: Option<u32>,
}

/// One year of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationYear {
    /// Year index, 1-based
    pub year: u32,
    /// Principal repaid during the year
    pub principal_paid: Money,
    /// Interest paid during the year
    pub interest_paid: Money,
    /// Outstanding balance at year end (clamped at zero)
    pub ending_balance: Money,
}

/// Output of the amortization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// Financed principal = loan_amount - down_payment
    pub principal: Money,
    /// Equated monthly installment
    pub monthly_payment: Money,
    /// Total interest paid over the full term
    pub total_interest: Money,
    /// Total of all payments over the full term
    pub total_cost: Money,
    /// Annual principal/interest/balance schedule
    pub schedule: Vec<AmortizationYear>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the EMI, total interest/cost, and annual amortization schedule for
/// a fixed-rate loan.
///
/// Standard annuity formula:
/// `payment = P * i * (1+i)^n / ((1+i)^n - 1)` with monthly rate `i` and
/// `n` total payments. A zero rate degenerates to straight-line repayment.
pub fn amortize(input: &LoanInput) -> FinanceResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.loan_amount < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "loan_amount".into(),
            reason: "loan amount must be >= 0".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "down payment must be >= 0".into(),
        });
    }
    if input.down_payment > input.loan_amount {
        return Err(FinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "down payment exceeds loan amount".into(),
        });
    }
    if input.term_years == 0 {
        return Err(FinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "term must be > 0 years".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "annual_rate".into(),
            reason: "interest rate must be >= 0".into(),
        });
    }

    let principal = input.loan_amount - input.down_payment;
    if principal.is_zero() {
        warnings.push("Down payment covers the full loan amount; nothing is financed".into());
    }

    let monthly_rate = input.annual_rate / Decimal::from(12);
    let number_of_payments = input.term_years * 12;
    let n = Decimal::from(number_of_payments);

    let monthly_payment = if monthly_rate.is_zero() {
        principal / n
    } else {
        let growth = compound(monthly_rate, number_of_payments, "annual_rate")?;
        principal * monthly_rate * growth / (growth - Decimal::ONE)
    };

    let total_cost = monthly_payment * n;
    let total_interest = total_cost - principal;

    // --- Annual schedule ---
    let report_years = input
        .schedule_years
        .map(|y| y.min(input.term_years))
        .unwrap_or(input.term_years);

    let mut schedule = Vec::with_capacity(report_years as usize);
    let mut balance = principal;

    for year in 1..=report_years {
        let mut interest_paid = Decimal::ZERO;
        let mut principal_paid = Decimal::ZERO;
        for _ in 0..12 {
            let interest = balance * monthly_rate;
            let principal_portion = monthly_payment - interest;
            balance -= principal_portion;
            interest_paid += interest;
            principal_paid += principal_portion;
        }
        // Final payments can leave a tiny negative residue; never report it
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }
        schedule.push(AmortizationYear {
            year,
            principal_paid,
            interest_paid,
            ending_balance: balance,
        });
    }

    let output = AmortizationOutput {
        principal,
        monthly_payment,
        total_interest,
        total_cost,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate EMI (annuity formula) with annual amortization schedule",
        &serde_json::json!({
            "loan_amount": input.loan_amount.to_string(),
            "down_payment": input.down_payment.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "term_years": input.term_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// 50L loan, 10L down, 8.5% for 20 years. The worked example every
    /// Indian home-loan calculator agrees on.
    fn home_loan() -> LoanInput {
        LoanInput {
            loan_amount: dec!(5_000_000),
            down_payment: dec!(1_000_000),
            annual_rate: dec!(0.085),
            term_years: 20,
            schedule_years: None,
        }
    }

    // ---------------------------------------------------------------
    // 1. Known EMI example
    // ---------------------------------------------------------------
    #[test]
    fn test_home_loan_emi() {
        let result = amortize(&home_loan()).unwrap().result;

        assert_eq!(result.principal, dec!(4_000_000));
        let diff = (result.monthly_payment - dec!(34713)).abs();
        assert!(diff < dec!(5), "EMI {} not within ±5 of 34713", result.monthly_payment);

        let interest_diff = (result.total_interest - dec!(4_331_000)).abs();
        assert!(
            interest_diff < dec!(1_000),
            "total interest {} not near 43.31L",
            result.total_interest
        );
    }

    // ---------------------------------------------------------------
    // 2. Cost identities
    // ---------------------------------------------------------------
    #[test]
    fn test_cost_identities() {
        let result = amortize(&home_loan()).unwrap().result;

        assert_eq!(result.total_cost, result.monthly_payment * dec!(240));
        assert_eq!(result.total_interest, result.total_cost - result.principal);
    }

    // ---------------------------------------------------------------
    // 3. Zero rate degenerates to straight-line repayment
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_rate_straight_line() {
        let mut input = home_loan();
        input.annual_rate = Decimal::ZERO;

        let result = amortize(&input).unwrap().result;
        assert_eq!(result.monthly_payment, dec!(4_000_000) / dec!(240));
        assert_eq!(result.total_interest, Decimal::ZERO);
    }

    // ---------------------------------------------------------------
    // 4. Schedule balance is non-increasing and reaches ~0 at term
    // ---------------------------------------------------------------
    #[test]
    fn test_schedule_balance_runs_down_to_zero() {
        let result = amortize(&home_loan()).unwrap().result;

        assert_eq!(result.schedule.len(), 20);
        let mut prev = result.principal;
        for row in &result.schedule {
            assert!(
                row.ending_balance <= prev,
                "balance rose in year {}: {} > {}",
                row.year,
                row.ending_balance,
                prev
            );
            prev = row.ending_balance;
        }

        let terminal = result.schedule.last().unwrap().ending_balance;
        assert!(terminal < dec!(0.01), "terminal balance {} not ~0", terminal);
    }

    // ---------------------------------------------------------------
    // 5. Each schedule year accounts for exactly 12 payments
    // ---------------------------------------------------------------
    #[test]
    fn test_schedule_year_sums_to_twelve_payments() {
        let result = amortize(&home_loan()).unwrap().result;

        for row in &result.schedule {
            let paid = row.principal_paid + row.interest_paid;
            let diff = (paid - result.monthly_payment * dec!(12)).abs();
            assert!(diff < dec!(0.01), "year {} paid {}", row.year, paid);
        }
    }

    // ---------------------------------------------------------------
    // 6. Truncated schedule reports only the leading years
    // ---------------------------------------------------------------
    #[test]
    fn test_truncated_schedule() {
        let mut input = home_loan();
        input.schedule_years = Some(3);

        let result = amortize(&input).unwrap().result;
        assert_eq!(result.schedule.len(), 3);
        assert_eq!(result.schedule[0].year, 1);
        // Early in a 20-year loan, most of the payment is interest
        assert!(result.schedule[0].interest_paid > result.schedule[0].principal_paid);
        assert!(result.schedule[2].ending_balance > dec!(3_000_000));
    }

    // ---------------------------------------------------------------
    // 7. Requesting more schedule years than the term caps at the term
    // ---------------------------------------------------------------
    #[test]
    fn test_schedule_years_capped_at_term() {
        let mut input = home_loan();
        input.schedule_years = Some(50);

        let result = amortize(&input).unwrap().result;
        assert_eq!(result.schedule.len(), 20);
    }

    // ---------------------------------------------------------------
    // 8. Full down payment finances nothing
    // ---------------------------------------------------------------
    #[test]
    fn test_full_down_payment() {
        let mut input = home_loan();
        input.down_payment = input.loan_amount;

        let output = amortize(&input).unwrap();
        assert_eq!(output.result.principal, Decimal::ZERO);
        assert_eq!(output.result.monthly_payment, Decimal::ZERO);
        assert!(!output.warnings.is_empty());
    }

    // ---------------------------------------------------------------
    // Validation and edge cases
    // ---------------------------------------------------------------
    #[test]
    fn test_down_payment_exceeding_loan_fails() {
        let mut input = home_loan();
        input.down_payment = dec!(6_000_000);

        assert!(matches!(
            amortize(&input),
            Err(FinanceError::InvalidInput { ref field, .. }) if field == "down_payment"
        ));
    }

    #[test]
    fn test_zero_term_fails() {
        let mut input = home_loan();
        input.term_years = 0;

        assert!(matches!(
            amortize(&input),
            Err(FinanceError::InvalidInput { ref field, .. }) if field == "term_years"
        ));
    }

    #[test]
    fn test_negative_rate_fails() {
        let mut input = home_loan();
        input.annual_rate = dec!(-0.01);

        assert!(amortize(&input).is_err());
    }

    #[test]
    fn test_negative_loan_amount_fails() {
        let mut input = home_loan();
        input.loan_amount = dec!(-1);

        assert!(amortize(&input).is_err());
    }

    #[test]
    fn test_absurd_rate_is_an_error_not_a_panic() {
        let mut input = home_loan();
        input.annual_rate = dec!(1_000_000);

        assert!(matches!(
            amortize(&input),
            Err(FinanceError::InvalidInput { ref field, .. }) if field == "annual_rate"
        ));
    }
}
