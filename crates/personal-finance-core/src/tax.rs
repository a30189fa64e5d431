use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Slab tables (FY 2024-25, simplified)
// ---------------------------------------------------------------------------

/// Flat standard deduction, applied under the new regime only.
const STANDARD_DEDUCTION: Decimal = dec!(50_000);

/// No tax below this taxable income, in either regime. Note the old regime's
/// nominal 2.5L exemption is collapsed to this same cutoff (see the warning
/// emitted when that band is hit).
const BASIC_EXEMPTION_LIMIT: Decimal = dec!(300_000);

/// Where the old-regime slab table nominally starts charging.
const OLD_REGIME_EXEMPTION: Decimal = dec!(250_000);

/// A marginal tax slab: income between `lower` and `upper` is taxed at `rate`.
#[derive(Debug, Clone, Copy)]
struct Slab {
    lower: Decimal,
    upper: Option<Decimal>,
    rate: Decimal,
}

const NEW_REGIME_SLABS: [Slab; 6] = [
    Slab { lower: dec!(0), upper: Some(dec!(300_000)), rate: dec!(0) },
    Slab { lower: dec!(300_000), upper: Some(dec!(600_000)), rate: dec!(0.05) },
    Slab { lower: dec!(600_000), upper: Some(dec!(900_000)), rate: dec!(0.10) },
    Slab { lower: dec!(900_000), upper: Some(dec!(1_200_000)), rate: dec!(0.15) },
    Slab { lower: dec!(1_200_000), upper: Some(dec!(1_500_000)), rate: dec!(0.20) },
    Slab { lower: dec!(1_500_000), upper: None, rate: dec!(0.30) },
];

const OLD_REGIME_SLABS: [Slab; 4] = [
    Slab { lower: dec!(0), upper: Some(dec!(250_000)), rate: dec!(0) },
    Slab { lower: dec!(250_000), upper: Some(dec!(500_000)), rate: dec!(0.05) },
    Slab { lower: dec!(500_000), upper: Some(dec!(1_000_000)), rate: dec!(0.20) },
    Slab { lower: dec!(1_000_000), upper: None, rate: dec!(0.30) },
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Income-tax regime selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    /// New regime: flat 50k standard deduction, six-slab table
    New,
    /// Old regime: itemized deductions, four-slab table
    Old,
}

/// Input parameters for income-tax computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual income
    pub gross_income: Money,
    /// Total itemized deductions (old regime only)
    #[serde(default)]
    pub deductions: Money,
    pub regime: TaxRegime,
}

/// Tax charged by one slab that the taxable income reaches into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabCharge {
    pub from: Money,
    /// Upper bound of the slab; None for the open-ended top slab
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Money>,
    pub rate: Rate,
    /// Portion of taxable income falling in this slab
    pub taxable_amount: Money,
    pub tax: Money,
}

/// Output of the income-tax engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxOutput {
    /// Income after the regime's deduction
    pub taxable_income: Money,
    pub tax_payable: Money,
    /// tax / gross income, as a decimal fraction
    pub effective_rate: Rate,
    /// (gross income - tax) / 12
    pub monthly_take_home: Money,
    /// Per-slab breakdown; empty when no tax is due
    pub slab_breakdown: Vec<SlabCharge>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute income tax under progressive marginal slabs for the selected
/// regime, plus the effective rate and monthly take-home pay.
pub fn compute_tax(input: &TaxInput) -> FinanceResult<ComputationOutput<TaxOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.gross_income <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "gross_income".into(),
            reason: "income must be > 0".into(),
        });
    }
    if input.deductions < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "deductions".into(),
            reason: "deductions must be >= 0".into(),
        });
    }

    let taxable_income = match input.regime {
        TaxRegime::Old => input.gross_income - input.deductions,
        TaxRegime::New => input.gross_income - STANDARD_DEDUCTION,
    };

    let (tax_payable, slab_breakdown) = if taxable_income <= BASIC_EXEMPTION_LIMIT {
        if input.regime == TaxRegime::Old && taxable_income > OLD_REGIME_EXEMPTION {
            warnings.push(
                "Basic exemption applied at 3,00,000 although old-regime slabs nominally \
                 start at 2,50,000"
                    .into(),
            );
        }
        (Decimal::ZERO, Vec::new())
    } else {
        let slabs: &[Slab] = match input.regime {
            TaxRegime::New => &NEW_REGIME_SLABS,
            TaxRegime::Old => &OLD_REGIME_SLABS,
        };
        charge_slabs(taxable_income, slabs)
    };

    let effective_rate = tax_payable / input.gross_income;
    let monthly_take_home = (input.gross_income - tax_payable) / Decimal::from(12);

    let output = TaxOutput {
        taxable_income,
        tax_payable,
        effective_rate,
        monthly_take_home,
        slab_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Progressive marginal slab computation (new/old regime, FY 2024-25 simplified)",
        &serde_json::json!({
            "regime": format!("{:?}", input.regime),
            "basic_exemption_limit": BASIC_EXEMPTION_LIMIT.to_string(),
            "standard_deduction_new_regime": STANDARD_DEDUCTION.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Sum marginal tax over every slab the taxable income reaches into.
fn charge_slabs(taxable: Money, slabs: &[Slab]) -> (Money, Vec<SlabCharge>) {
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for slab in slabs {
        if taxable <= slab.lower {
            break;
        }
        let ceiling = slab.upper.map(|u| taxable.min(u)).unwrap_or(taxable);
        let taxable_amount = ceiling - slab.lower;
        let tax = taxable_amount * slab.rate;
        total += tax;
        breakdown.push(SlabCharge {
            from: slab.lower,
            to: slab.upper,
            rate: slab.rate,
            taxable_amount,
            tax,
        });
    }

    (total, breakdown)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
