use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a SIP / lumpsum growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    /// Initial lumpsum invested at year 0
    pub initial_lumpsum: Money,
    /// Fixed monthly SIP contribution
    pub monthly_contribution: Money,
    /// Expected nominal annual return as a decimal (0.12 = 12%)
    pub annual_return: Rate,
    /// Projection horizon in years
    pub years: u32,
    /// Annual fund expense ratio, modeled as a drag on CAGR
    #[serde(default)]
    pub expense_ratio: Rate,
    /// Terminal capital-gains tax rate applied to the total gain
    #[serde(default)]
    pub ltcg_tax_rate: Rate,
}

/// Balance and cumulative-invested snapshot at a year boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthYear {
    /// Year index, 0-based (year 0 is the starting position)
    pub year: u32,
    /// Display label ("Yr 0", "Yr 1", ...)
    pub label: String,
    /// Gross balance at the year boundary
    pub balance: Money,
    /// Cumulative amount invested so far
    pub invested: Money,
}

/// Output of the growth projection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthOutput {
    /// Year-boundary snapshots, year 0 through the horizon
    pub yearly: Vec<GrowthYear>,
    /// Total amount contributed (lumpsum + all SIP installments)
    pub total_invested: Money,
    /// Gross corpus before tax
    pub gross_corpus: Money,
    /// Gain over invested capital, floored at zero
    pub wealth_gained: Money,
    /// Capital-gains tax on the gain
    pub tax_amount: Money,
    /// Corpus net of capital-gains tax
    pub net_value: Money,
    /// Post-expense-drag growth rate actually applied
    pub effective_annual_rate: Rate,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project compounded growth of a lumpsum plus monthly SIP contributions.
///
/// The expense ratio is a deduction from the annual return (a CAGR drag),
/// not a separate fee on the balance. Each month the contribution lands
/// first and then the whole balance grows at the effective monthly rate, so
/// contributions compound for the full month in which they are made.
pub fn project_growth(input: &GrowthInput) -> FinanceResult<ComputationOutput<GrowthOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.initial_lumpsum < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "initial_lumpsum".into(),
            reason: "lumpsum must be >= 0".into(),
        });
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "contribution must be >= 0".into(),
        });
    }
    if input.annual_return < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "annual_return".into(),
            reason: "expected return must be >= 0".into(),
        });
    }
    if input.expense_ratio < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "expense_ratio".into(),
            reason: "expense ratio must be >= 0".into(),
        });
    }
    if input.ltcg_tax_rate < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "ltcg_tax_rate".into(),
            reason: "tax rate must be >= 0".into(),
        });
    }

    let effective_annual_rate = (input.annual_return - input.expense_ratio).max(Decimal::ZERO);
    if input.expense_ratio > input.annual_return {
        warnings.push(
            "Expense ratio exceeds the expected return; effective growth clamped to 0%".into(),
        );
    }
    let monthly_rate = effective_annual_rate / Decimal::from(12);

    let mut balance = input.initial_lumpsum;
    let mut invested = input.initial_lumpsum;
    let mut yearly = Vec::with_capacity(input.years as usize + 1);

    yearly.push(GrowthYear {
        year: 0,
        label: "Yr 0".to_string(),
        balance,
        invested,
    });

    for year in 1..=input.years {
        for _ in 0..12 {
            balance += input.monthly_contribution;
            balance *= Decimal::ONE + monthly_rate;
            invested += input.monthly_contribution;
        }
        yearly.push(GrowthYear {
            year,
            label: format!("Yr {year}"),
            balance,
            invested,
        });
    }

    let wealth_gained = (balance - invested).max(Decimal::ZERO);
    let tax_amount = wealth_gained * input.ltcg_tax_rate;
    let net_value = balance - tax_amount;

    let output = GrowthOutput {
        yearly,
        total_invested: invested,
        gross_corpus: balance,
        wealth_gained,
        tax_amount,
        net_value,
        effective_annual_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly-compounded SIP/lumpsum projection with expense-ratio drag and terminal LTCG tax",
        &serde_json::json!({
            "annual_return": input.annual_return.to_string(),
            "expense_ratio": input.expense_ratio.to_string(),
            "effective_annual_rate": effective_annual_rate.to_string(),
            "ltcg_tax_rate": input.ltcg_tax_rate.to_string(),
            "years": input.years,
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

    /// 1L lumpsum, 10k monthly SIP at 12% over 10 years with 1% expense
    /// ratio and 12% LTCG. The original calculator's defaults.
    fn default_sip() -> GrowthInput {
        GrowthInput {
            initial_lumpsum: dec!(100_000),
            monthly_contribution: dec!(10_000),
            annual_return: dec!(0.12),
            years: 10,
            expense_ratio: dec!(0.01),
            ltcg_tax_rate: dec!(0.12),
        }
    }

    // ---------------------------------------------------------------
    // 1. Year-0 snapshot is the lumpsum for both series
    // ---------------------------------------------------------------
    #[test]
    fn test_year_zero_snapshot_is_lumpsum() {
        let result = project_growth(&default_sip()).unwrap().result;

        let yr0 = &result.yearly[0];
        assert_eq!(yr0.balance, dec!(100_000));
        assert_eq!(yr0.invested, dec!(100_000));
        assert_eq!(yr0.label, "Yr 0");
    }

    // ---------------------------------------------------------------
    // 2. Invested capital is lumpsum + 12 * years * contribution
    // ---------------------------------------------------------------
    #[test]
    fn test_total_invested() {
        let result = project_growth(&default_sip()).unwrap().result;

        let expected = dec!(100_000) + dec!(10_000) * dec!(120);
        assert_eq!(result.total_invested, expected);
        assert_eq!(result.yearly.last().unwrap().invested, expected);
    }

    // ---------------------------------------------------------------
    // 3. First-year balance matches a hand-rolled monthly loop
    // ---------------------------------------------------------------
    #[test]
    fn test_first_year_monthly_compounding() {
        let input = default_sip();
        let result = project_growth(&input).unwrap().result;

        // Effective rate 11%, contribution lands before growth each month
        let monthly_rate = dec!(0.11) / dec!(12);
        let mut expected = dec!(100_000);
        for _ in 0..12 {
            expected += dec!(10_000);
            expected *= Decimal::ONE + monthly_rate;
        }
        assert_eq!(result.yearly[1].balance, expected);
    }

    // ---------------------------------------------------------------
    // 4. Gain, tax, and net value tie out
    // ---------------------------------------------------------------
    #[test]
    fn test_gain_tax_net_identities() {
        let result = project_growth(&default_sip()).unwrap().result;

        assert_eq!(
            result.wealth_gained,
            result.gross_corpus - result.total_invested
        );
        assert_eq!(result.tax_amount, result.wealth_gained * dec!(0.12));
        assert_eq!(result.net_value, result.gross_corpus - result.tax_amount);
    }

    // ---------------------------------------------------------------
    // 5. Gain is never negative, even with zero growth
    // ---------------------------------------------------------------
    #[test]
    fn test_gain_never_negative_at_zero_growth() {
        let input = GrowthInput {
            initial_lumpsum: dec!(50_000),
            monthly_contribution: Decimal::ZERO,
            annual_return: dec!(0.01),
            years: 25,
            expense_ratio: dec!(0.01),
            ltcg_tax_rate: dec!(0.12),
        };

        let output = project_growth(&input).unwrap();
        let result = &output.result;

        assert_eq!(result.effective_annual_rate, Decimal::ZERO);
        assert_eq!(result.gross_corpus, dec!(50_000));
        assert_eq!(result.wealth_gained, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.net_value, dec!(50_000));
    }

    // ---------------------------------------------------------------
    // 6. Expense drag reduces the corpus
    // ---------------------------------------------------------------
    #[test]
    fn test_expense_ratio_drags_corpus() {
        let mut no_drag = default_sip();
        no_drag.expense_ratio = Decimal::ZERO;

        let with_drag = project_growth(&default_sip()).unwrap().result;
        let without = project_growth(&no_drag).unwrap().result;

        assert!(with_drag.gross_corpus < without.gross_corpus);
        assert_eq!(with_drag.total_invested, without.total_invested);
    }

    // ---------------------------------------------------------------
    // 7. Expense ratio above the return clamps and warns
    // ---------------------------------------------------------------
    #[test]
    fn test_expense_ratio_above_return_warns() {
        let mut input = default_sip();
        input.annual_return = dec!(0.005);
        input.expense_ratio = dec!(0.02);

        let output = project_growth(&input).unwrap();
        assert_eq!(output.result.effective_annual_rate, Decimal::ZERO);
        assert!(!output.warnings.is_empty());
    }

    // ---------------------------------------------------------------
    // 8. Zero-year horizon reports only the starting snapshot
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_year_horizon() {
        let mut input = default_sip();
        input.years = 0;

        let result = project_growth(&input).unwrap().result;
        assert_eq!(result.yearly.len(), 1);
        assert_eq!(result.gross_corpus, dec!(100_000));
    }

    // ---------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------
    #[test]
    fn test_negative_lumpsum_fails() {
        let mut input = default_sip();
        input.initial_lumpsum = dec!(-1);

        assert!(matches!(
            project_growth(&input),
            Err(FinanceError::InvalidInput { ref field, .. }) if field == "initial_lumpsum"
        ));
    }

    #[test]
    fn test_negative_return_fails() {
        let mut input = default_sip();
        input.annual_return = dec!(-0.05);

        assert!(project_growth(&input).is_err());
    }

    #[test]
    fn test_negative_tax_rate_fails() {
        let mut input = default_sip();
        input.ltcg_tax_rate = dec!(-0.1);

        assert!(project_growth(&input).is_err());
    }
}
