use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::{compound, fv_annuity_due};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

/// Fixed safe-withdrawal assumption: 5% of the corpus per year.
const SAFE_WITHDRAWAL_RATE: Decimal = dec!(0.05);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Projection flavor selected on the original screen.
///
/// FIRE currently runs the identical projection as Standard; the selector is
/// kept for interface compatibility and flagged via a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    Standard,
    Fire,
}

/// Input parameters for a retirement corpus projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub mode: ProjectionMode,
    pub current_age: u32,
    pub target_age: u32,
    pub current_savings: Money,
    pub monthly_contribution: Money,
    /// Expected annual return (CAGR) as a decimal (0.12 = 12%)
    pub annual_return: Rate,
}

/// Output of the retirement projection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub years_to_target: u32,
    /// Current savings compounded annually to the target age
    pub fv_current_savings: Money,
    /// Future value of the monthly SIP (annuity-due, monthly compounding)
    pub fv_contributions: Money,
    pub total_corpus: Money,
    /// Sustainable annual income at the safe withdrawal rate
    pub annual_income: Money,
    pub monthly_income: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a retirement corpus from current savings plus monthly SIP
/// contributions, and the sustainable income it supports.
///
/// The lumpsum compounds annually; contributions compound monthly as an
/// annuity-due (each contribution lands at the start of its month).
pub fn project_retirement(
    input: &RetirementInput,
) -> FinanceResult<ComputationOutput<RetirementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.target_age <= input.current_age {
        return Err(FinanceError::InvalidInput {
            field: "target_age".into(),
            reason: "target age must be greater than current age".into(),
        });
    }
    if input.current_savings < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "current_savings".into(),
            reason: "savings must be >= 0".into(),
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

    if input.mode == ProjectionMode::Fire {
        warnings.push(
            "FIRE mode currently uses the same projection as Standard; no early-retirement \
             specific assumptions are applied"
                .into(),
        );
    }

    let years_to_target = input.target_age - input.current_age;

    let fv_current_savings =
        input.current_savings * compound(input.annual_return, years_to_target, "annual_return")?;

    let monthly_rate = input.annual_return / Decimal::from(12);
    let months = years_to_target * 12;
    let fv_contributions = fv_annuity_due(
        input.monthly_contribution,
        monthly_rate,
        months,
        "annual_return",
    )?;

    let total_corpus = fv_current_savings + fv_contributions;
    let annual_income = total_corpus * SAFE_WITHDRAWAL_RATE;
    let monthly_income = annual_income / Decimal::from(12);

    let output = RetirementOutput {
        years_to_target,
        fv_current_savings,
        fv_contributions,
        total_corpus,
        annual_income,
        monthly_income,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement corpus projection (annual lumpsum compounding + monthly annuity-due SIP, 5% safe withdrawal)",
        &serde_json::json!({
            "mode": format!("{:?}", input.mode),
            "current_age": input.current_age,
            "target_age": input.target_age,
            "annual_return": input.annual_return.to_string(),
            "safe_withdrawal_rate": SAFE_WITHDRAWAL_RATE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
