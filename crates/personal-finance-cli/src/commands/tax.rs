use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::tax::{self, TaxInput, TaxRegime};

use crate::input;

/// Arguments for income-tax computation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TaxArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross annual income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Total itemized deductions (old regime only)
    #[arg(long, default_value = "0")]
    pub deductions: Decimal,

    /// Tax regime
    #[arg(long, value_parser = parse_regime, default_value = "new")]
    pub regime: TaxRegime,
}

fn parse_regime(s: &str) -> Result<TaxRegime, String> {
    match s.to_ascii_lowercase().as_str() {
        "new" => Ok(TaxRegime::New),
        "old" => Ok(TaxRegime::Old),
        other => Err(format!("unknown regime '{other}' (expected new|old)")),
    }
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: TaxInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TaxInput {
            gross_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            deductions: args.deductions,
            regime: args.regime,
        }
    };

    let result = tax::compute_tax(&tax_input)?;
    Ok(serde_json::to_value(result)?)
}
