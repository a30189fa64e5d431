use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::growth::{self, GrowthInput};

use crate::input;

/// Arguments for SIP / lumpsum growth projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SipArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial lumpsum invested at year 0
    #[arg(long, default_value = "0")]
    pub lumpsum: Decimal,

    /// Fixed monthly SIP contribution
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Expected nominal annual return as a decimal (0.12 = 12%)
    #[arg(long)]
    pub annual_return: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual fund expense ratio (CAGR drag)
    #[arg(long, default_value = "0")]
    pub expense_ratio: Decimal,

    /// Terminal LTCG tax rate on the gain
    #[arg(long, default_value = "0")]
    pub ltcg_tax_rate: Decimal,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let growth_input: GrowthInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        GrowthInput {
            initial_lumpsum: args.lumpsum,
            monthly_contribution: args.monthly,
            annual_return: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
            years: args
                .years
                .ok_or("--years is required (or provide --input)")?,
            expense_ratio: args.expense_ratio,
            ltcg_tax_rate: args.ltcg_tax_rate,
        }
    };

    let result = growth::project_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}
